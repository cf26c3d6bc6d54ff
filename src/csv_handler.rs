use std::io::{Read, Write};

use csv::{QuoteStyle, StringRecord, Terminator, Trim};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, ConvertResult};

/// Columns a bunq export must carry. Order in the file does not matter.
pub const INPUT_COLUMNS: [&str; 6] = ["Date", "Amount", "Account", "Counterparty", "Name", "Description"];

/// Header of the ING import file, in the order it is written.
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "Datum",
    "Naam / Omschrijving",
    "Rekening",
    "Tegenrekening",
    "Code",
    "Af Bij",
    "Bedrag (EUR)",
    "MutatieSoort",
    "Mededelingen",
];

#[derive(Debug, Deserialize)]
pub struct InputRecord {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Counterparty")]
    pub counterparty: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

// Field order is the column order of OUTPUT_COLUMNS.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct OutputRecord {
    pub datum: String,
    pub naam_omschrijving: String,
    pub rekening: String,
    pub tegenrekening: String,
    pub code: &'static str,
    pub af_bij: &'static str,
    pub bedrag: String,
    pub mutatie_soort: &'static str,
    pub mededelingen: String,
}

/// One input row together with where it came from.
#[derive(Debug)]
pub struct SourceRow {
    pub line: u64,
    pub raw: StringRecord,
    pub record: InputRecord,
}

impl SourceRow {
    /// The row as it appeared in the file, for diagnostics.
    pub fn describe(&self) -> String {
        self.raw.iter().collect::<Vec<_>>().join(",")
    }
}

/// Reader over a bunq CSV export whose header has already been checked.
pub struct InputReader<R> {
    reader: csv::Reader<R>,
    headers: StringRecord,
}

impl<R: Read> InputReader<R> {
    /// Reads the header row and fails if any of [`INPUT_COLUMNS`] is absent.
    pub fn new(source: R) -> ConvertResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(Trim::Headers)
            .from_reader(source);
        let headers = reader.headers().map_err(ConvertError::Read)?.clone();

        if let Some(missing) = INPUT_COLUMNS
            .into_iter()
            .find(|column| !headers.iter().any(|header| header == *column))
        {
            return Err(ConvertError::MissingColumn(missing));
        }
        debug!("Input header accepted: {:?}", headers);

        Ok(InputReader { reader, headers })
    }

    /// Yields rows in file order. Stops being useful after the first error.
    pub fn rows(&mut self) -> impl Iterator<Item = ConvertResult<SourceRow>> + '_ {
        let headers = &self.headers;
        self.reader.records().map(move |result| {
            let raw = result.map_err(ConvertError::Read)?;
            let line = raw.position().map_or(0, |position| position.line());
            let record = raw
                .deserialize::<InputRecord>(Some(headers))
                .map_err(ConvertError::Read)?;
            Ok(SourceRow { line, raw, record })
        })
    }
}

/// Writes the ING header followed by `records`, every field quoted.
pub fn write_records<W: Write>(destination: W, records: &[OutputRecord]) -> ConvertResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(destination);

    writer.write_record(OUTPUT_COLUMNS).map_err(ConvertError::Write)?;
    for record in records {
        writer.serialize(record).map_err(ConvertError::Write)?;
    }
    writer.flush().map_err(|e| ConvertError::Write(e.into()))
}

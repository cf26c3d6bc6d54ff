use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{info, trace};

use crate::amount::{AmountError, Direction, SOURCE_CONVENTION, TARGET_CONVENTION, format_amount, parse_amount};
use crate::csv_handler::{InputReader, InputRecord, OutputRecord, write_records};
use crate::error::{ConvertError, ConvertResult};

/// ING transaction code for a plain transfer.
pub const TRANSFER_CODE: &str = "OV";
/// ING mutation kind matching [`TRANSFER_CODE`].
pub const TRANSFER_KIND: &str = "Overschrijving";

/// Maps one bunq record onto the ING import columns.
pub fn convert_record(record: InputRecord) -> Result<OutputRecord, AmountError> {
    let amount = parse_amount(&record.amount, SOURCE_CONVENTION)?;

    Ok(OutputRecord {
        datum: record.date,
        naam_omschrijving: record.name,
        rekening: record.account,
        tegenrekening: record.counterparty,
        code: TRANSFER_CODE,
        af_bij: Direction::of(amount).as_str(),
        bedrag: format_amount(amount, TARGET_CONVENTION),
        mutatie_soort: TRANSFER_KIND,
        mededelingen: record.description,
    })
}

/// Converts every row of `source`, stopping at the first row that fails.
pub fn convert_rows<R: Read>(source: R) -> ConvertResult<Vec<OutputRecord>> {
    let mut reader = InputReader::new(source)?;
    let mut converted = Vec::new();

    for row in reader.rows() {
        let row = row?;
        let row_text = row.describe();
        let value = row.record.amount.clone();

        let output = convert_record(row.record).map_err(|source| ConvertError::InvalidAmount {
            line: row.line,
            value,
            row: row_text,
            source,
        })?;
        trace!("Line {}: {} {} {}", row.line, output.datum, output.af_bij, output.bedrag);
        converted.push(output);
    }

    Ok(converted)
}

/// Reads the bunq export at `input_path` and writes the ING file to `output_path`.
///
/// The output file is only created once every row has converted, so a bad
/// header or amount leaves nothing behind at `output_path`.
pub fn convert(input_path: &Path, output_path: &Path) -> ConvertResult<()> {
    info!("Converting {} to {}", input_path.display(), output_path.display());

    let input = File::open(input_path).map_err(|source| ConvertError::OpenInput {
        path: input_path.to_path_buf(),
        source,
    })?;
    let records = convert_rows(input)?;

    let output = File::create(output_path).map_err(|source| ConvertError::CreateOutput {
        path: output_path.to_path_buf(),
        source,
    })?;
    write_records(output, &records)?;

    info!("Wrote {} records to {}", records.len(), output_path.display());
    Ok(())
}

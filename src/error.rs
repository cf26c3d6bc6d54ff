use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::amount::AmountError;

/// Everything that can abort a conversion. None of these are retried.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to open input file {}: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create output file {}: {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("input header is missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("invalid amount {value:?} on line {line} ({row}): {source}")]
    InvalidAmount {
        line: u64,
        value: String,
        row: String,
        #[source]
        source: AmountError,
    },

    #[error("failed to read input CSV: {0}")]
    Read(#[source] csv::Error),

    #[error("failed to write output CSV: {0}")]
    Write(#[source] csv::Error),
}

pub type ConvertResult<T> = Result<T, ConvertError>;

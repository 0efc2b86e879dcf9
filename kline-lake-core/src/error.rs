use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::schema::SchemaError;

/// Faults that end a conversion run.
///
/// Per-file conditions the pipeline expects (corrupt archives, empty or
/// all-invalid payloads, existing outputs) are reported as
/// [`ConversionOutcome`](crate::outcome::ConversionOutcome) values instead.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input directory does not exist: {}", .0.display())]
    InputRootMissing(PathBuf),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("csv read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataframe error: {0}")]
    Frame(String),

    #[error("parquet I/O error: {0}")]
    ParquetError(String),

    #[error("output schema violated: {0}")]
    Schema(#[from] SchemaError),
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

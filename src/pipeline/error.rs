use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to open input file '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse '{0}' as delimited text")]
    Parse(PathBuf, #[source] PolarsError),

    #[error("Value '{value}' in column '{column}' (row {row}) does not match date format '{format}'")]
    DateParse {
        column: String,
        row: usize,
        value: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Cannot impute column '{column}': all {rows} values are missing, mean is undefined")]
    Imputation { column: String, rows: usize },

    #[error("Required column '{0}' not found in table")]
    MissingColumn(String),

    #[error("Column '{column}' has dtype {dtype}, expected text dates")]
    UnexpectedDateType { column: String, dtype: String },

    // Errors while writing the cleaned file
    #[error("I/O error writing cleaned file '{0}'")]
    WriteIo(PathBuf, #[source] std::io::Error),
    #[error("Encoding error writing cleaned file '{0}'")]
    WritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}

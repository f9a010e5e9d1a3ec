use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Required column '{0}' not found in cleaned table")]
    MissingColumn(String),

    #[error("Column '{column}' has dtype {dtype}, expected a numeric column")]
    NotNumeric { column: String, dtype: String },

    #[error("Failed to create plot directory '{0}'")]
    PlotDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}

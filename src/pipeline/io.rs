//! Reading the raw weather export and writing the cleaned copy.

use crate::pipeline::error::PipelineError;
use log::{debug, info};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads a delimited file with a header row into a `DataFrame`.
///
/// Column types are inferred from every row of the file, so a stray `"-"` late in
/// an otherwise numeric column makes the whole column text instead of failing the read.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] if the file cannot be opened and
/// [`PipelineError::Parse`] if polars cannot read it as delimited text.
pub fn load_table(path: &Path, delimiter: u8) -> Result<DataFrame, PipelineError> {
    let file = File::open(path).map_err(|e| PipelineError::Io(path.to_path_buf(), e))?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|opts| opts.with_separator(delimiter))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| PipelineError::Parse(path.to_path_buf(), e))?;

    info!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Writes the table to `path` with a header row, replacing any existing file.
///
/// The frame is first written to a temporary file next to `path` and then renamed
/// over it, so readers never observe a partially written file.
pub fn persist_table(
    df: &mut DataFrame,
    path: &Path,
    delimiter: u8,
    date_format: &str,
) -> Result<(), PipelineError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file =
        NamedTempFile::new_in(dir).map_err(|e| PipelineError::WriteIo(path.to_path_buf(), e))?;

    CsvWriter::new(temp_file.as_file_mut())
        .include_header(true)
        .with_separator(delimiter)
        .with_date_format(Some(date_format.to_string()))
        .finish(df)
        .map_err(|e| PipelineError::WritePolars(path.to_path_buf(), e))?;

    temp_file
        .persist(path)
        .map_err(|e| PipelineError::WriteIo(path.to_path_buf(), e.error))?;

    debug!("Renamed temporary output into place at {}", path.display());
    info!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

//! The cleaning stages, exposed as an extension trait on `DataFrame`.
//!
//! Every stage consumes a frame and returns the transformed frame, so the stages can be
//! chained in the fixed order the pipeline needs and each one can be tested on its own.

use crate::pipeline::error::PipelineError;
use crate::pipeline::inspect::MissingReport;
use crate::utils::{finite_values, is_float_dtype, is_numeric_dtype, parse_cell};
use chrono::NaiveDate;
use log::{debug, info, warn};
use polars::prelude::*;
use serde::Deserialize;

/// What to do with a numeric column that has no valid values at all when imputing.
///
/// The mean of such a column is undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyColumnPolicy {
    /// Leave the column missing and log a warning.
    #[default]
    Skip,
    /// Abort with [`PipelineError::Imputation`].
    Fail,
}

pub trait CleaningFrameExt {
    /// Converts each named column to `Float64`.
    ///
    /// Text cells are trimmed and parsed; anything that is not a finite number becomes null.
    /// Columns that are already numeric are cast. This never fails on cell content, only
    /// when a named column is absent from the frame.
    fn coerce_numeric<S: AsRef<str>>(self, columns: &[S]) -> Result<DataFrame, PipelineError>;

    /// Null count for every column, in frame order.
    fn missing_report(&self) -> MissingReport;

    /// Fills the nulls of every numeric column with the mean of its valid values.
    /// `NaN` and infinite floats are treated as nulls first. Columns that receive fills
    /// become `Float64`; columns without missing values are untouched.
    fn impute_mean(self, policy: EmptyColumnPolicy) -> Result<DataFrame, PipelineError>;

    /// Rounds every floating point column to `decimals` places.
    fn round_numeric(self, decimals: u32) -> Result<DataFrame, PipelineError>;

    /// Parses a text column into a `Date` column using a single `chrono` format.
    /// Nulls stay null; a column that is already `Date` is returned unchanged.
    fn parse_date(self, column: &str, format: &str) -> Result<DataFrame, PipelineError>;
}

impl CleaningFrameExt for DataFrame {
    fn coerce_numeric<S: AsRef<str>>(
        mut self,
        columns: &[S],
    ) -> Result<DataFrame, PipelineError> {
        for name in columns {
            let name = name.as_ref();
            let column = self
                .column(name)
                .map_err(|_| PipelineError::MissingColumn(name.to_string()))?;
            let nulls_before = column.null_count();

            let coerced = match column.dtype() {
                DataType::String => {
                    let cells = column.str()?;
                    Float64Chunked::from_iter_options(
                        column.name().clone(),
                        cells.into_iter().map(|cell| cell.and_then(parse_cell)),
                    )
                    .into_series()
                }
                dtype if is_numeric_dtype(dtype) => finite_values(column)?,
                dtype => {
                    warn!(
                        "Column '{}' has non-numeric dtype {}, every value becomes missing",
                        name, dtype
                    );
                    Series::full_null(column.name().clone(), column.len(), &DataType::Float64)
                }
            };

            let degraded = coerced.null_count().saturating_sub(nulls_before);
            if degraded > 0 {
                warn!(
                    "Coerced {} unparseable value(s) in '{}' to missing",
                    degraded, name
                );
            }
            self.with_column(coerced)?;
        }
        info!("Coerced {} column(s) to Float64", columns.len());
        Ok(self)
    }

    fn missing_report(&self) -> MissingReport {
        MissingReport::of(self)
    }

    fn impute_mean(mut self, policy: EmptyColumnPolicy) -> Result<DataFrame, PipelineError> {
        let rows = self.height();

        let float_columns: Vec<PlSmallStr> = self
            .get_columns()
            .iter()
            .filter(|column| is_float_dtype(column.dtype()))
            .map(|column| column.name().clone())
            .collect();
        for name in float_columns {
            let column = self.column(name.as_str())?;
            let finite = finite_values(column)?;
            let non_finite = finite.null_count() - column.null_count();
            if non_finite > 0 {
                debug!("Treating {} non-finite value(s) in '{}' as missing", non_finite, name);
                self.with_column(finite)?;
            }
        }

        let mut fills = Vec::new();

        for column in self.get_columns() {
            if !is_numeric_dtype(column.dtype()) || column.null_count() == 0 {
                continue;
            }
            let name = column.name().to_string();
            let as_float = column.cast(&DataType::Float64)?;

            match as_float.f64()?.mean() {
                Some(mean) => {
                    debug!(
                        "Filling {} missing value(s) in '{}' with mean {}",
                        column.null_count(),
                        name,
                        mean
                    );
                    fills.push(
                        col(name.as_str())
                            .cast(DataType::Float64)
                            .fill_null(lit(mean)),
                    );
                }
                None => match policy {
                    EmptyColumnPolicy::Skip => {
                        warn!("Column '{}' has no valid values, leaving it missing", name)
                    }
                    EmptyColumnPolicy::Fail => {
                        return Err(PipelineError::Imputation { column: name, rows })
                    }
                },
            }
        }

        if fills.is_empty() {
            return Ok(self);
        }
        info!("Imputed column means for {} column(s)", fills.len());
        Ok(self.lazy().with_columns(fills).collect()?)
    }

    fn round_numeric(self, decimals: u32) -> Result<DataFrame, PipelineError> {
        let rounding: Vec<Expr> = self
            .get_columns()
            .iter()
            .filter(|column| is_float_dtype(column.dtype()))
            .map(|column| col(column.name().clone()).round(decimals))
            .collect();

        if rounding.is_empty() {
            return Ok(self);
        }
        debug!("Rounding {} column(s) to {} decimals", rounding.len(), decimals);
        Ok(self.lazy().with_columns(rounding).collect()?)
    }

    fn parse_date(mut self, column: &str, format: &str) -> Result<DataFrame, PipelineError> {
        let source = self
            .column(column)
            .map_err(|_| PipelineError::MissingColumn(column.to_string()))?;

        match source.dtype() {
            DataType::Date => return Ok(self),
            DataType::String => {}
            other => {
                return Err(PipelineError::UnexpectedDateType {
                    column: column.to_string(),
                    dtype: other.to_string(),
                })
            }
        }

        let cells = source.str()?;
        let mut dates = Vec::with_capacity(cells.len());
        for (row, cell) in cells.into_iter().enumerate() {
            let date = match cell {
                None => None,
                Some(raw) => Some(NaiveDate::parse_from_str(raw.trim(), format).map_err(
                    |e| PipelineError::DateParse {
                        column: column.to_string(),
                        row,
                        value: raw.to_string(),
                        format: format.to_string(),
                        source: e,
                    },
                )?),
            };
            dates.push(date);
        }

        let parsed = DateChunked::from_naive_date_options(source.name().clone(), dates);
        self.with_column(parsed.into_series())?;
        info!("Parsed column '{}' as dates", column);
        Ok(self)
    }
}

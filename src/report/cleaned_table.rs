//! Contains the `CleanedTable` wrapper the reporting step works on.

use crate::report::correlation::CorrelationMatrix;
use crate::report::error::ReportError;
use crate::report::summary::{ColumnSummary, SummaryStatistics};
use crate::utils::is_numeric_dtype;
use log::debug;
use polars::prelude::*;

/// A cleaned weather table together with the name of its date column.
///
/// Produced by [`crate::CleaningPipeline`]. Every reporting method only reads the frame.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    /// The underlying cleaned DataFrame.
    pub frame: DataFrame,
    date_column: String,
}

impl CleanedTable {
    pub fn new(frame: DataFrame, date_column: &str) -> Self {
        Self {
            frame,
            date_column: date_column.to_string(),
        }
    }

    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    /// Descriptive statistics for the given numeric columns, in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::MissingColumn`] if a column does not exist and
    /// [`ReportError::NotNumeric`] if it is not numeric.
    pub fn summary_statistics<S: AsRef<str>>(
        &self,
        columns: &[S],
    ) -> Result<SummaryStatistics, ReportError> {
        let columns = columns
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.numeric_column(name)?;
                Ok(ColumnSummary::of(&self.frame, name)?)
            })
            .collect::<Result<Vec<_>, ReportError>>()?;
        Ok(SummaryStatistics { columns })
    }

    /// Pearson correlation across every numeric column of the table.
    pub fn correlation_matrix(&self) -> Result<CorrelationMatrix, ReportError> {
        let numeric: Vec<String> = self
            .frame
            .get_columns()
            .iter()
            .filter(|column| is_numeric_dtype(column.dtype()))
            .map(|column| column.name().to_string())
            .collect();
        debug!("Computing correlations over {} numeric column(s)", numeric.len());
        Ok(CorrelationMatrix::of(&self.frame, numeric)?)
    }

    pub(crate) fn numeric_column(&self, name: &str) -> Result<&Column, ReportError> {
        let column = self
            .frame
            .column(name)
            .map_err(|_| ReportError::MissingColumn(name.to_string()))?;
        if !is_numeric_dtype(column.dtype()) {
            return Err(ReportError::NotNumeric {
                column: name.to_string(),
                dtype: column.dtype().to_string(),
            });
        }
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::cleaning::CleaningFrameExt;

    fn cleaned() -> Result<CleanedTable, Box<dyn std::error::Error>> {
        let frame = df!(
            "Date" => ["2023-01-05", "2023-01-06", "2023-01-07", "2023-01-08"],
            "TempAvgF" => [60i64, 48, 45, 46],
            "VisibilityAvgMiles" => [4.0, 10.0, 10.0, 9.5],
            "PrecipitationSumInches" => [0.46, 0.0, 0.15, 0.0],
            "Events" => [Some("Rain"), None, None, None],
        )?
        .parse_date("Date", "%Y-%m-%d")?;
        Ok(CleanedTable::new(frame, "Date"))
    }

    #[test]
    fn test_summary_statistics_for_selected_columns() -> Result<(), Box<dyn std::error::Error>> {
        let table = cleaned()?;
        let stats = table.summary_statistics(&["TempAvgF", "PrecipitationSumInches"])?;

        assert_eq!(stats.columns.len(), 2);
        let temp = stats.get("TempAvgF").unwrap();
        assert_eq!(temp.count, 4);
        assert!((temp.mean - 49.75).abs() < 1e-9);
        assert_eq!(temp.min, 45.0);
        assert_eq!(temp.max, 60.0);
        assert_eq!(stats.get("PrecipitationSumInches").unwrap().max, 0.46);
        Ok(())
    }

    #[test]
    fn test_summary_statistics_rejects_bad_columns() -> Result<(), Box<dyn std::error::Error>> {
        let table = cleaned()?;
        assert!(matches!(
            table.summary_statistics(&["WindGustMPH"]),
            Err(ReportError::MissingColumn(_))
        ));
        assert!(matches!(
            table.summary_statistics(&["Events"]),
            Err(ReportError::NotNumeric { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_correlation_skips_non_numeric_columns() -> Result<(), Box<dyn std::error::Error>> {
        let table = cleaned()?;
        let matrix = table.correlation_matrix()?;

        assert_eq!(
            matrix.columns(),
            ["TempAvgF", "VisibilityAvgMiles", "PrecipitationSumInches"]
        );
        for i in 0..matrix.len() {
            assert_eq!(matrix.values()[i][i], 1.0);
            for j in 0..matrix.len() {
                assert_eq!(matrix.values()[i][j], matrix.values()[j][i]);
            }
        }
        Ok(())
    }
}

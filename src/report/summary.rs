//! Descriptive statistics in the shape of a pandas `describe()` table.

use polars::prelude::*;
use std::fmt;

/// Count, mean, sample standard deviation, min, quartiles and max of one column.
///
/// Missing values are excluded. Statistics that are undefined for the number of values
/// present (everything for an empty column, `std` for a single value) are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Describes one numeric column of `frame` in a single lazy `select`.
    pub fn of(frame: &DataFrame, column: &str) -> PolarsResult<Self> {
        let values = col(column).cast(DataType::Float64);
        let quantile = |q: f64| values.clone().quantile(lit(q), QuantileMethod::Linear);

        let row = frame
            .clone()
            .lazy()
            .select([
                values.clone().count().alias("count"),
                values.clone().mean().alias("mean"),
                values.clone().std(1).alias("std"),
                values.clone().min().alias("min"),
                quantile(0.25).alias("q25"),
                quantile(0.5).alias("median"),
                quantile(0.75).alias("q75"),
                values.clone().max().alias("max"),
            ])
            .collect()?;

        let stat = |name: &str| -> PolarsResult<f64> {
            Ok(row
                .column(name)?
                .cast(&DataType::Float64)?
                .f64()?
                .get(0)
                .unwrap_or(f64::NAN))
        };
        let count = stat("count")? as usize;

        Ok(Self {
            column: column.to_string(),
            count,
            mean: stat("mean")?,
            std: if count < 2 { f64::NAN } else { stat("std")? },
            min: stat("min")?,
            q25: stat("q25")?,
            median: stat("median")?,
            q75: stat("q75")?,
            max: stat("max")?,
        })
    }

    fn stat(&self, idx: usize) -> f64 {
        match idx {
            0 => self.count as f64,
            1 => self.mean,
            2 => self.std,
            3 => self.min,
            4 => self.q25,
            5 => self.median,
            6 => self.q75,
            _ => self.max,
        }
    }
}

const STAT_LABELS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Summary of several columns, printed with one column per measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStatistics {
    pub columns: Vec<ColumnSummary>,
}

impl SummaryStatistics {
    pub fn get(&self, column: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.column == column)
    }
}

impl fmt::Display for SummaryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|c| c.column.len().max(12))
            .collect();

        write!(f, "{:<6}", "")?;
        for (column, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", column.column, width = *width)?;
        }
        writeln!(f)?;

        for (idx, label) in STAT_LABELS.iter().enumerate() {
            write!(f, "{:<6}", label)?;
            for (column, width) in self.columns.iter().zip(&widths) {
                write!(f, "  {:>width$.6}", column.stat(idx), width = *width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_summary_matches_describe() -> PolarsResult<()> {
        let df = df!("TempAvgF" => [Some(4.0), Some(1.0), None, Some(3.0), Some(2.0)])?;
        let summary = ColumnSummary::of(&df, "TempAvgF")?;

        assert_eq!(summary.count, 4);
        assert!(close(summary.mean, 2.5));
        assert!(close(summary.std, (5.0f64 / 3.0).sqrt()));
        assert_eq!(summary.min, 1.0);
        assert!(close(summary.q25, 1.75));
        assert!(close(summary.median, 2.5));
        assert!(close(summary.q75, 3.25));
        assert_eq!(summary.max, 4.0);
        Ok(())
    }

    #[test]
    fn test_summary_of_integer_column() -> PolarsResult<()> {
        let df = df!("TempHighF" => [74i64, 56, 58, 61])?;
        let summary = ColumnSummary::of(&df, "TempHighF")?;
        assert_eq!(summary.count, 4);
        assert!(close(summary.mean, 62.25));
        assert!(close(summary.median, 59.5));
        assert_eq!(summary.max, 74.0);
        Ok(())
    }

    #[test]
    fn test_summary_of_single_and_empty_columns() -> PolarsResult<()> {
        let df = df!(
            "PrecipitationSumInches" => [Some(0.46), None],
            "WindGustMPH" => [None::<f64>, None],
        )?;

        let single = ColumnSummary::of(&df, "PrecipitationSumInches")?;
        assert_eq!(single.count, 1);
        assert_eq!(single.mean, 0.46);
        assert!(single.std.is_nan());
        assert_eq!(single.q75, 0.46);

        let empty = ColumnSummary::of(&df, "WindGustMPH")?;
        assert_eq!(empty.count, 0);
        assert!(empty.mean.is_nan());
        assert!(empty.min.is_nan());
        assert!(empty.median.is_nan());
        Ok(())
    }

    #[test]
    fn test_display_has_row_per_statistic() -> PolarsResult<()> {
        let df = df!("VisibilityAvgMiles" => [10.0, 9.0])?;
        let stats = SummaryStatistics {
            columns: vec![ColumnSummary::of(&df, "VisibilityAvgMiles")?],
        };
        let text = stats.to_string();
        assert!(text.lines().next().unwrap().contains("VisibilityAvgMiles"));
        assert_eq!(text.lines().count(), 1 + STAT_LABELS.len());
        assert!(text.contains("9.500000"));
        Ok(())
    }
}

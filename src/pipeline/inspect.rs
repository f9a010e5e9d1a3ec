//! Read-only views over a table: dtype summary and missing-value counts.

use crate::utils::missing_count;
use polars::prelude::DataFrame;
use std::fmt;

/// Name, dtype and non-null count of a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
}

/// Per-column dtype overview of a table, printed before and after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    pub fn of(df: &DataFrame) -> Self {
        let columns = df
            .get_columns()
            .iter()
            .map(|column| ColumnInfo {
                name: column.name().to_string(),
                dtype: column.dtype().to_string(),
                non_null: column.len() - missing_count(column),
            })
            .collect();
        Self {
            rows: df.height(),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl fmt::Display for TableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} rows, {} columns", self.rows, self.columns.len())?;
        let width = self.columns.iter().map(|c| c.name.len()).max().unwrap_or(6);
        writeln!(f, " #  {:<width$}  {:>14}  Dtype", "Column", "Non-Null Count")?;
        for (idx, column) in self.columns.iter().enumerate() {
            writeln!(
                f,
                "{:>2}  {:<width$}  {:>14}  {}",
                idx,
                column.name,
                format!("{} non-null", column.non_null),
                column.dtype
            )?;
        }
        Ok(())
    }
}

/// Missing counts per column, in table order. `NaN` and infinite floats count as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReport {
    counts: Vec<(String, usize)>,
}

impl MissingReport {
    pub fn of(df: &DataFrame) -> Self {
        Self {
            counts: df
                .get_columns()
                .iter()
                .map(|column| (column.name().to_string(), missing_count(column)))
                .collect(),
        }
    }

    /// Missing count for `column`, or `None` if the table has no such column.
    pub fn get(&self, column: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl fmt::Display for MissingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.counts.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
        for (name, count) in &self.counts {
            writeln!(f, "{:<width$}  {:>6}", name, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_missing_report_counts_nulls() -> Result<(), PolarsError> {
        let df = df!(
            "Date" => ["2023-01-05", "2023-01-06", "2023-01-07"],
            "WindGustMPH" => [Some(21.0), None, None],
            "TempAvgF" => [Some(60i64), Some(58), None],
        )?;

        let report = MissingReport::of(&df);

        assert_eq!(report.get("Date"), Some(0));
        assert_eq!(report.get("WindGustMPH"), Some(2));
        assert_eq!(report.get("TempAvgF"), Some(1));
        assert_eq!(report.get("Events"), None);
        assert_eq!(report.total(), 3);
        let order: Vec<&str> = report.iter().map(|(name, _)| name).collect();
        assert_eq!(order, ["Date", "WindGustMPH", "TempAvgF"]);
        Ok(())
    }

    #[test]
    fn test_missing_report_counts_nan_cells() -> Result<(), PolarsError> {
        let df = df!("VisibilityAvgMiles" => [Some(10.0), Some(f64::NAN), None])?;
        assert_eq!(MissingReport::of(&df).get("VisibilityAvgMiles"), Some(2));
        assert_eq!(TableInfo::of(&df).columns[0].non_null, 1);
        Ok(())
    }

    #[test]
    fn test_table_info_lists_dtypes() -> Result<(), PolarsError> {
        let df = df!(
            "Events" => [Some("Rain"), None],
            "TempAvgF" => [60i64, 58],
        )?;

        let info = TableInfo::of(&df);

        assert_eq!(info.rows, 2);
        let events = info.column("Events").expect("Events column listed");
        assert_eq!(events.non_null, 1);
        assert_eq!(events.dtype, DataType::String.to_string());
        assert!(info.to_string().contains("TempAvgF"));
        Ok(())
    }
}

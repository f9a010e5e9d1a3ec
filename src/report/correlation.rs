use polars::prelude::*;
use std::fmt;

/// Pairwise Pearson correlation between the numeric columns of a table.
///
/// Each coefficient uses the rows where both values are present. Only the upper
/// triangle is computed and mirrored, and the diagonal is always `1.0`. Coefficients
/// that are undefined (a constant column, or fewer than two complete rows) are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Correlates the named numeric columns of `frame`, all pairs in one lazy `select`.
    pub fn of(frame: &DataFrame, columns: Vec<String>) -> PolarsResult<Self> {
        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        let mut pairs = Vec::new();
        let mut coefficients = Vec::new();
        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                coefficients.push(
                    pearson_corr(
                        col(columns[i].as_str()).cast(DataType::Float64),
                        col(columns[j].as_str()).cast(DataType::Float64),
                    )
                    .alias(format!("{}_{}", i, j)),
                );
                pairs.push((i, j));
            }
        }

        if !coefficients.is_empty() {
            let row = frame.clone().lazy().select(coefficients).collect()?;
            for (cell, (i, j)) in row.get_columns().iter().zip(pairs) {
                let r = cell
                    .cast(&DataType::Float64)?
                    .f64()?
                    .get(0)
                    .map_or(f64::NAN, |r| r.clamp(-1.0, 1.0));
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Ok(Self { columns, values })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient between two columns by name.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// Annotated matrix, two decimals per cell.
impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self.columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let cell_width = self.columns.iter().map(|c| c.len()).max().unwrap_or(0).max(5);

        write!(f, "{:<label_width$}", "")?;
        for column in &self.columns {
            write!(f, "  {:>cell_width$}", column)?;
        }
        writeln!(f)?;
        for (column, row) in self.columns.iter().zip(&self.values) {
            write!(f, "{:<label_width$}", column)?;
            for value in row {
                write!(f, "  {:>cell_width$.2}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! HTML chart output for the cleaned table (`plotting` feature).
//!
//! Charts are always written to files so a run works without a display; `show`
//! additionally opens them in the browser.

use crate::config::TimeSeriesSpec;
use crate::report::cleaned_table::CleanedTable;
use crate::report::correlation::CorrelationMatrix;
use crate::report::error::ReportError;
use bon::bon;
use log::info;
use plotlars::{HeatMap, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::*;
use std::path::{Path, PathBuf};

#[bon]
impl CleanedTable {
    /// Writes one line chart per series, value against the date column, to
    /// `<output_dir>/<column>.html`.
    ///
    /// # Arguments
    ///
    /// * `.series(&[TimeSeriesSpec])`: **Required.** The columns to chart.
    /// * `.output_dir(&Path)`: **Required.** Created if it does not exist.
    /// * `.show(bool)`: Optional. Also open each chart in the browser. Defaults to `false`.
    ///
    /// # Returns
    ///
    /// The paths of the written files, in series order.
    #[builder]
    pub fn plot_timeseries(
        &self,
        series: &[TimeSeriesSpec],
        output_dir: &Path,
        show: Option<bool>,
    ) -> Result<Vec<PathBuf>, ReportError> {
        let show = show.unwrap_or(false);
        self.frame
            .column(self.date_column())
            .map_err(|_| ReportError::MissingColumn(self.date_column().to_string()))?;
        ensure_dir(output_dir)?;

        let mut written = Vec::with_capacity(series.len());
        for spec in series {
            self.numeric_column(&spec.column)?;
            let [r, g, b] = spec.color;

            let plot = TimeSeriesPlot::builder()
                .data(&self.frame)
                .x(self.date_column())
                .y(spec.column.as_str())
                .colors(vec![Rgb(r, g, b)])
                .plot_title(Text::from(spec.title.as_str()).size(18))
                .x_title(self.date_column())
                .y_title(spec.y_label.as_str())
                .build();

            let path = output_dir.join(format!("{}.html", spec.column));
            write_plot(&plot, &path, show);
            written.push(path);
        }
        Ok(written)
    }

    /// Writes the correlation matrix as a heatmap to `<output_dir>/correlation.html`.
    ///
    /// Same options as [`CleanedTable::plot_timeseries`].
    #[builder]
    pub fn plot_correlation(
        &self,
        matrix: &CorrelationMatrix,
        output_dir: &Path,
        show: Option<bool>,
    ) -> Result<PathBuf, ReportError> {
        ensure_dir(output_dir)?;
        let long = correlation_long_frame(matrix)?;

        let plot = HeatMap::builder()
            .data(&long)
            .x("x")
            .y("y")
            .z("correlation")
            .plot_title(Text::from("Correlation Matrix").size(18))
            .build();

        let path = output_dir.join("correlation.html");
        write_plot(&plot, &path, show.unwrap_or(false));
        Ok(path)
    }
}

/// One row per matrix cell, the layout the heatmap expects.
fn correlation_long_frame(matrix: &CorrelationMatrix) -> PolarsResult<DataFrame> {
    let columns = matrix.columns();
    let cells = columns.len() * columns.len();
    let mut xs: Vec<&str> = Vec::with_capacity(cells);
    let mut ys: Vec<&str> = Vec::with_capacity(cells);
    let mut zs: Vec<f64> = Vec::with_capacity(cells);

    for (row_name, row) in columns.iter().zip(matrix.values()) {
        for (col_name, value) in columns.iter().zip(row) {
            xs.push(col_name);
            ys.push(row_name);
            zs.push(*value);
        }
    }
    df!("x" => xs, "y" => ys, "correlation" => zs)
}

fn ensure_dir(dir: &Path) -> Result<(), ReportError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportError::PlotDirCreation(dir.to_path_buf(), e))
}

fn write_plot(plot: &impl Plot, path: &Path, show: bool) {
    let target = path.to_string_lossy();
    plot.write_html(&*target);
    info!("Wrote chart to {}", path.display());
    if show {
        plot.plot();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::cleaning::CleaningFrameExt;
    use tempfile::tempdir;

    fn cleaned() -> Result<CleanedTable, Box<dyn std::error::Error>> {
        let frame = df!(
            "Date" => ["2023-01-05", "2023-01-06", "2023-01-07"],
            "TempAvgF" => [60.0, 48.0, 45.0],
            "VisibilityAvgMiles" => [4.0, 10.0, 9.5],
            "Events" => [Some("Rain"), None, None],
        )?
        .parse_date("Date", "%Y-%m-%d")?;
        Ok(CleanedTable::new(frame, "Date"))
    }

    #[test]
    fn test_correlation_long_frame_has_cell_per_pair() -> Result<(), Box<dyn std::error::Error>> {
        let matrix = cleaned()?.correlation_matrix()?;
        let long = correlation_long_frame(&matrix)?;
        assert_eq!(long.height(), 4);
        assert_eq!(long.column("correlation")?.f64()?.get(0), Some(1.0));
        Ok(())
    }

    #[test]
    fn test_plot_timeseries_writes_html_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let plot_dir = dir.path().join("plots");
        let table = cleaned()?;
        let series = vec![TimeSeriesSpec::new(
            "TempAvgF",
            "Average Temperature Over Time",
            "Temperature (F)",
            [255, 0, 0],
        )];

        let written = table
            .plot_timeseries()
            .series(&series)
            .output_dir(&plot_dir)
            .call()?;

        assert_eq!(written, vec![plot_dir.join("TempAvgF.html")]);
        assert!(written[0].is_file());
        Ok(())
    }

    #[test]
    fn test_plot_correlation_writes_heatmap_with_undefined_cells(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let plot_dir = dir.path().join("plots");
        let frame = df!(
            "TempAvgF" => [60.0, 48.0, 45.0],
            "Calm" => [0.0, 0.0, 0.0],
        )?;
        let table = CleanedTable::new(frame, "Date");
        let matrix = table.correlation_matrix()?;
        assert!(matrix.get("TempAvgF", "Calm").unwrap().is_nan());

        let written = table
            .plot_correlation()
            .matrix(&matrix)
            .output_dir(&plot_dir)
            .call()?;

        assert_eq!(written, plot_dir.join("correlation.html"));
        assert!(written.is_file());
        Ok(())
    }

    #[test]
    fn test_plot_timeseries_rejects_text_column() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let series = vec![TimeSeriesSpec::new("Events", "Events", "Events", [0, 0, 0])];
        let result = cleaned()?
            .plot_timeseries()
            .series(&series)
            .output_dir(dir.path())
            .call();
        assert!(matches!(result, Err(ReportError::NotNumeric { .. })));
        Ok(())
    }
}

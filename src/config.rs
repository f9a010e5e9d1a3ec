//! Run configuration: file locations, the column contract with the input file, and
//! reporting options. Every field has a default matching the Austin daily weather export.

use crate::error::ConfigError;
use crate::pipeline::cleaning::EmptyColumnPolicy;
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// The measurement columns that arrive as text in the raw export.
pub const DEFAULT_NUMERIC_COLUMNS: [&str; 16] = [
    "DewPointHighF",
    "DewPointAvgF",
    "DewPointLowF",
    "HumidityHighPercent",
    "HumidityAvgPercent",
    "HumidityLowPercent",
    "SeaLevelPressureHighInches",
    "SeaLevelPressureAvgInches",
    "SeaLevelPressureLowInches",
    "VisibilityHighMiles",
    "VisibilityAvgMiles",
    "VisibilityLowMiles",
    "WindHighMPH",
    "WindAvgMPH",
    "WindGustMPH",
    "PrecipitationSumInches",
];

const MAX_PRECISION: u32 = 10;

/// Settings for one cleaning run.
///
/// Deserialised from TOML with [`PipelineConfig::from_toml_file`]; fields left out of the
/// file keep their defaults.
///
/// ```
/// use weather_clean::PipelineConfig;
///
/// let config = PipelineConfig::from_toml_str(r#"
///     input_path = "data/austin_weather.csv"
///     precision = 1
///
///     [report]
///     show_plots = false
/// "#).unwrap();
/// assert_eq!(config.precision, 1);
/// assert_eq!(config.numeric_columns.len(), 16);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    /// Single ASCII field separator used for both reading and writing.
    pub delimiter: char,
    pub numeric_columns: Vec<String>,
    pub date_column: String,
    /// `chrono` format of the date column in the input file.
    pub date_format: String,
    /// `chrono` format used when writing dates to the output file.
    pub output_date_format: String,
    /// Decimal places kept by the rounding stage.
    pub precision: u32,
    pub empty_column_policy: EmptyColumnPolicy,
    pub report: ReportConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/austin_weather.csv"),
            output_path: PathBuf::from("clean_data.csv"),
            delimiter: ',',
            numeric_columns: DEFAULT_NUMERIC_COLUMNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            date_column: "Date".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            output_date_format: "%Y-%m-%d".to_string(),
            precision: 2,
            empty_column_policy: EmptyColumnPolicy::default(),
            report: ReportConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Directory the HTML charts are written to.
    pub plot_dir: PathBuf,
    /// Also open every chart in the browser after writing it.
    pub show_plots: bool,
    pub summary_columns: Vec<String>,
    pub timeseries: Vec<TimeSeriesSpec>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            plot_dir: PathBuf::from("plots"),
            show_plots: false,
            summary_columns: ["TempAvgF", "VisibilityAvgMiles", "PrecipitationSumInches"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            timeseries: vec![
                TimeSeriesSpec::new(
                    "TempAvgF",
                    "Average Temperature Over Time",
                    "Temperature (F)",
                    [255, 0, 0],
                ),
                TimeSeriesSpec::new(
                    "VisibilityAvgMiles",
                    "Average Visibility Over Time",
                    "Visibility (Miles)",
                    [0, 0, 255],
                ),
                TimeSeriesSpec::new(
                    "PrecipitationSumInches",
                    "Total Precipitation Over Time",
                    "Precipitation (Inches)",
                    [0, 128, 0],
                ),
            ],
        }
    }
}

/// One line chart of `column` against the date column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeSeriesSpec {
    pub column: String,
    pub title: String,
    pub y_label: String,
    /// Line color as RGB.
    pub color: [u8; 3],
}

impl TimeSeriesSpec {
    pub fn new(column: &str, title: &str, y_label: &str, color: [u8; 3]) -> Self {
        Self {
            column: column.to_string(),
            title: title.to_string(),
            y_label: y_label.to_string(),
            color,
        }
    }
}

impl PipelineConfig {
    /// Reads, parses and validates a TOML configuration file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates TOML configuration text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// The delimiter as the byte polars expects. Only meaningful after [`Self::validate`].
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    /// Checks the settings for contradictions before any file is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.numeric_columns.is_empty() {
            return Err(invalid("numeric_columns must name at least one column"));
        }
        let mut seen = HashSet::new();
        for column in &self.numeric_columns {
            if column.trim().is_empty() {
                return Err(invalid("numeric_columns contains an empty name"));
            }
            if !seen.insert(column.as_str()) {
                return Err(invalid(format!(
                    "column '{}' is listed twice in numeric_columns",
                    column
                )));
            }
        }

        if self.date_column.trim().is_empty() {
            return Err(invalid("date_column must not be empty"));
        }
        if seen.contains(self.date_column.as_str()) {
            return Err(invalid(format!(
                "date column '{}' is also listed as numeric",
                self.date_column
            )));
        }

        check_date_format("date_format", &self.date_format)?;
        check_date_format("output_date_format", &self.output_date_format)?;

        if !self.delimiter.is_ascii() || matches!(self.delimiter, '"' | '\n' | '\r') {
            return Err(invalid(format!(
                "delimiter {:?} must be a single ASCII character other than a quote or newline",
                self.delimiter
            )));
        }

        if self.input_path == self.output_path {
            return Err(invalid(format!(
                "output_path must differ from input_path ({})",
                self.input_path.display()
            )));
        }

        if self.precision > MAX_PRECISION {
            return Err(invalid(format!(
                "precision {} exceeds the maximum of {}",
                self.precision, MAX_PRECISION
            )));
        }

        for series in &self.report.timeseries {
            if series.column == self.date_column {
                return Err(invalid(format!(
                    "cannot plot the date column '{}' against itself",
                    series.column
                )));
            }
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

fn check_date_format(field: &str, format: &str) -> Result<(), ConfigError> {
    if format.is_empty() || StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid(format!(
            "{} '{}' is not a valid date format",
            field, format
        )));
    }
    Ok(())
}

use crate::config::PipelineConfig;
use crate::error::ConfigError;
use crate::pipeline::cleaning::CleaningFrameExt;
use crate::pipeline::error::PipelineError;
use crate::pipeline::inspect::{MissingReport, TableInfo};
use crate::pipeline::io::{load_table, persist_table};
use crate::report::cleaned_table::CleanedTable;
use log::info;
use polars::prelude::DataFrame;

/// Everything a cleaning run produces: the cleaned table plus the diagnostics
/// gathered between stages.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    /// Dtypes as loaded, before any coercion.
    pub info_before: TableInfo,
    /// Dtypes after the numeric columns were coerced.
    pub info_after: TableInfo,
    /// Missing counts right after coercion.
    pub missing_before: MissingReport,
    /// Missing counts after imputation and rounding.
    pub missing_after: MissingReport,
    pub table: CleanedTable,
}

/// Runs the stages in their fixed order:
/// coerce → report → impute → round → report → parse dates → persist.
#[derive(Debug, Clone)]
pub struct CleaningPipeline {
    config: PipelineConfig,
}

impl CleaningPipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Loads the input file, cleans it and writes the cleaned copy to the output path.
    pub fn run(&self) -> Result<CleaningOutcome, PipelineError> {
        let raw = load_table(&self.config.input_path, self.config.delimiter_byte())?;
        let mut outcome = self.clean(raw)?;
        persist_table(
            &mut outcome.table.frame,
            &self.config.output_path,
            self.config.delimiter_byte(),
            &self.config.output_date_format,
        )?;
        Ok(outcome)
    }

    /// Applies every cleaning stage to an already loaded table without touching the disk.
    pub fn clean(&self, raw: DataFrame) -> Result<CleaningOutcome, PipelineError> {
        let config = &self.config;
        let info_before = TableInfo::of(&raw);

        let coerced = raw.coerce_numeric(&config.numeric_columns)?;
        let info_after = TableInfo::of(&coerced);
        let missing_before = coerced.missing_report();
        info!(
            "{} missing value(s) after coercion",
            missing_before.total()
        );

        let imputed = coerced
            .impute_mean(config.empty_column_policy)?
            .round_numeric(config.precision)?;
        let missing_after = imputed.missing_report();
        info!(
            "{} missing value(s) after imputation",
            missing_after.total()
        );

        let frame = imputed.parse_date(&config.date_column, &config.date_format)?;

        Ok(CleaningOutcome {
            info_before,
            info_after,
            missing_before,
            missing_after,
            table: CleanedTable::new(frame, &config.date_column),
        })
    }
}

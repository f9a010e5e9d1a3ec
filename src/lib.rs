mod config;
mod error;
mod pipeline;
mod report;
mod utils;

pub use config::{PipelineConfig, ReportConfig, TimeSeriesSpec, DEFAULT_NUMERIC_COLUMNS};
pub use error::{ConfigError, WeatherCleanError};
pub use utils::round_to;

pub use pipeline::cleaning::{CleaningFrameExt, EmptyColumnPolicy};
pub use pipeline::error::PipelineError;
pub use pipeline::inspect::{ColumnInfo, MissingReport, TableInfo};
pub use pipeline::io::{load_table, persist_table};
pub use pipeline::runner::{CleaningOutcome, CleaningPipeline};

pub use report::cleaned_table::CleanedTable;
pub use report::correlation::CorrelationMatrix;
pub use report::error::ReportError;
pub use report::summary::{ColumnSummary, SummaryStatistics};

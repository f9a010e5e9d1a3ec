//! Read-only reporting over the cleaned table: descriptive statistics, correlations and charts.

pub mod cleaned_table;
pub mod correlation;
pub mod error;
#[cfg(feature = "plotting")]
pub mod render;
pub mod summary;

use clap::Parser;
use log::{error, info};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use weather_clean::{CleaningPipeline, PipelineConfig, WeatherCleanError};

/// Clean a daily weather CSV export and report on the result.
#[derive(Debug, Parser)]
#[command(name = "weather-clean", version)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not write the HTML charts.
    #[cfg_attr(not(feature = "plotting"), allow(dead_code))]
    #[arg(long)]
    no_plots: bool,
}

fn main() -> ExitCode {
    // Set RUST_LOG=debug (or warn, off) to change verbosity
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("Error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), WeatherCleanError> {
    let config = match &cli.config {
        Some(path) => {
            info!("Using configuration from {}", path.display());
            PipelineConfig::from_toml_file(path)?
        }
        None => PipelineConfig::default(),
    };
    let pipeline = CleaningPipeline::new(config)?;
    let outcome = pipeline.run()?;

    println!("Data types before conversion:\n{}", outcome.info_before);
    println!("Data types after conversion:\n{}", outcome.info_after);
    println!("Missing values before handling:\n{}", outcome.missing_before);
    println!("Missing values after imputation:\n{}", outcome.missing_after);

    let report = &pipeline.config().report;
    let table = &outcome.table;

    #[cfg(feature = "plotting")]
    if !cli.no_plots {
        table
            .plot_timeseries()
            .series(&report.timeseries)
            .output_dir(&report.plot_dir)
            .show(report.show_plots)
            .call()?;
    }

    let summary = table.summary_statistics(&report.summary_columns)?;
    println!("Summary Statistics:\n{}", summary);

    let correlation = table.correlation_matrix()?;
    println!("Correlation Matrix:\n{}", correlation);

    #[cfg(feature = "plotting")]
    if !cli.no_plots {
        table
            .plot_correlation()
            .matrix(&correlation)
            .output_dir(&report.plot_dir)
            .show(report.show_plots)
            .call()?;
    }

    Ok(())
}

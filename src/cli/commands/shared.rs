//! Shared components for CLI commands
//!
//! This module contains logging setup, configuration loading, progress bar
//! styling and size formatting used by the command implementations.

use crate::app::services::pipeline::JobOutcome;
use crate::cli::args::ExtractArgs;
use crate::config::Config;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, info};

/// Run statistics for reporting
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Rows read from the dataset
    pub rows_scanned: u64,
    /// Records written to the workbook
    pub records_written: usize,
    /// Rows of the region rejected by the status filter
    pub records_filtered_out: u64,
    /// Workbook sheets written
    pub sheets_written: usize,
    /// Public-site markers placed in the KMZ
    pub site_markers: usize,
    /// Warnings raised during the run
    pub warnings: usize,
    /// KMZ failure that did not invalidate the workbook
    pub geo_error: Option<String>,
    /// Total processing time
    pub processing_time: Duration,
    /// Output file sizes in bytes
    pub output_sizes: Vec<(String, u64)>,
}

impl ProcessingStats {
    /// Collect the numbers worth reporting from a finished job
    pub fn from_outcome(outcome: &JobOutcome, processing_time: Duration) -> Self {
        let mut stats = Self {
            rows_scanned: outcome.extraction.rows_scanned,
            records_written: outcome.report.records_written,
            records_filtered_out: outcome.extraction.records_filtered_out,
            sheets_written: outcome.report.sheets_written,
            processing_time,
            output_sizes: vec![(
                outcome.report.path.display().to_string(),
                outcome.report.file_size,
            )],
            ..Default::default()
        };

        match &outcome.kmz {
            Some(Ok(kmz)) => {
                stats.site_markers = kmz.site_markers;
                stats
                    .output_sizes
                    .push((kmz.path.display().to_string(), kmz.file_size));
            }
            Some(Err(e)) => stats.geo_error = Some(e.to_string()),
            None => {}
        }
        stats
    }

    /// Calculate total output size in bytes
    pub fn total_output_size(&self) -> u64 {
        self.output_sizes.iter().map(|(_, size)| size).sum()
    }

    /// Format output size in human-readable format
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coverage_extractor={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (file -> env -> args)
pub fn load_configuration(args: &ExtractArgs) -> Result<Config> {
    let config = Config::load_layered(args.config_file.as_deref())?;
    let config = args.apply_to(config);
    config.validate()?;
    Ok(config)
}

/// Log where the configuration came from once logging is up
pub fn log_configuration(args: &ExtractArgs, config: &Config) {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => match Config::default_config_path().filter(|path| path.is_file()) {
            Some(path) => info!("Using config file: {}", path.display()),
            None => info!("No config file found, using defaults and environment variables"),
        },
    }
    debug!("Effective configuration: {:?}", config);
}

/// Create a percent-based progress bar
pub fn create_progress_bar(message: &str) -> ProgressBar {
    let pb = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

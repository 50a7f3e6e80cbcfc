//! Extract command implementation
//!
//! The job itself is synchronous. It runs on a blocking worker and reports
//! through a [`ChannelSink`]; this side drains the channel into a progress
//! bar. On Ctrl-C the receiver is dropped, which makes the sink report the
//! job as abandoned, and the command waits for the worker to discard its
//! staged output before exiting.

use super::shared::{
    ProcessingStats, create_progress_bar, load_configuration, log_configuration, setup_logging,
};
use crate::app::services::extractor::{LogLevel, ProgressSink};
use crate::app::services::pipeline::{JobOutcome, run_job};
use crate::cli::args::{ExtractArgs, OutputFormat};
use crate::constants::PROGRESS_CHANNEL_CAPACITY;
use crate::{Error, ReferenceData, Result};
use chrono::Local;
use colored::*;
use indicatif::{HumanDuration, ProgressBar};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Event forwarded from the worker to the terminal
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Progress { percent: f64, message: String },
    Log { level: LogLevel, message: String },
}

/// Sink that forwards events over a bounded channel
///
/// Sending never blocks the worker: when the channel is full the event is
/// dropped. A closed channel means nobody is listening any more.
pub struct ChannelSink {
    sender: mpsc::Sender<ProgressEvent>,
}

impl ChannelSink {
    pub fn new(sender: mpsc::Sender<ProgressEvent>) -> Self {
        Self { sender }
    }

    fn send(&self, event: ProgressEvent) -> anyhow::Result<()> {
        match self.sender.try_send(event) {
            Ok(()) | Err(TrySendError::Full(_)) => Ok(()),
            Err(TrySendError::Closed(_)) => anyhow::bail!("progress receiver closed"),
        }
    }
}

impl ProgressSink for ChannelSink {
    fn on_progress(&self, percent: f64, message: &str) -> anyhow::Result<()> {
        self.send(ProgressEvent::Progress {
            percent,
            message: message.to_string(),
        })
    }

    fn on_log(&self, level: LogLevel, message: &str) -> anyhow::Result<()> {
        self.send(ProgressEvent::Log {
            level,
            message: message.to_string(),
        })
    }

    fn is_abandoned(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Extract command runner
///
/// 1. Load configuration and set up logging
/// 2. Run the job on a blocking worker
/// 3. Drive the progress bar from the event channel, watching for Ctrl-C
/// 4. Print the run summary
pub async fn run_extract(args: ExtractArgs) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    args.validate()?;
    let config = load_configuration(&args)?;
    setup_logging(&args.get_log_level(&config.logging.level), args.quiet)?;
    log_configuration(&args, &config);
    debug!("Command line arguments: {:?}", args);

    let reference = Arc::new(ReferenceData::builtin());
    let job = config.to_job(&reference, Local::now().naive_local())?;
    info!(
        "Starting extraction of region {} (filter: {}, chunk size: {})",
        job.target_region,
        job.filter.summary(),
        job.chunk_size
    );

    let (sender, receiver) = mpsc::channel(PROGRESS_CHANNEL_CAPACITY);
    let worker = tokio::task::spawn_blocking({
        let reference = Arc::clone(&reference);
        move || {
            let sink = ChannelSink::new(sender);
            run_job(&job, reference, &sink)
        }
    });

    let pb = args.show_progress().then(|| create_progress_bar("Starting"));
    let result = drive_worker(worker, receiver, tokio::signal::ctrl_c(), pb.as_ref()).await;
    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }
    let (outcome, warnings) = result?;

    let mut stats = ProcessingStats::from_outcome(&outcome, start_time.elapsed());
    stats.warnings = warnings;

    match args.output_format {
        OutputFormat::Human => print_human_summary(&outcome, &stats),
        OutputFormat::Json => print_json_summary(&outcome, &stats)?,
    }
    Ok(stats)
}

/// Feed the progress bar until the worker finishes or an interrupt arrives
///
/// On interrupt the receiver is dropped, which the worker sees as an
/// abandoned job, and the worker is still awaited so staged output is
/// discarded before returning. Returns the outcome and the number of
/// warnings logged.
async fn drive_worker(
    worker: JoinHandle<Result<JobOutcome>>,
    mut receiver: mpsc::Receiver<ProgressEvent>,
    interrupt: impl Future<Output = std::io::Result<()>>,
    pb: Option<&ProgressBar>,
) -> Result<(JobOutcome, usize)> {
    tokio::pin!(interrupt);
    let mut watch_interrupt = true;
    let mut interrupted = false;
    let mut warnings = 0;

    loop {
        tokio::select! {
            event = receiver.recv() => match event {
                Some(ProgressEvent::Progress { percent, message }) => {
                    if let Some(pb) = pb {
                        pb.set_position(percent.round() as u64);
                        pb.set_message(message);
                    }
                }
                Some(ProgressEvent::Log { level, message }) => {
                    if level == LogLevel::Warn || level == LogLevel::Error {
                        warnings += 1;
                    }
                    if let (Some(pb), LogLevel::Info) = (pb, level) {
                        pb.set_message(message);
                    }
                }
                None => break,
            },
            signal = &mut interrupt, if watch_interrupt => match signal {
                Ok(()) => {
                    interrupted = true;
                    break;
                }
                Err(e) => {
                    warn!("Failed to listen for CTRL+C: {}", e);
                    watch_interrupt = false;
                }
            },
        }
    }

    if interrupted {
        eprintln!("\nReceived CTRL+C, discarding the run...");
        drop(receiver);
        if let Ok(Ok(outcome)) = worker.await {
            warn!(
                "Interrupt arrived after {} was saved",
                outcome.report_path.display()
            );
        }
        return Err(Error::processing_interrupted("Processing interrupted by user"));
    }

    let outcome = worker
        .await
        .map_err(|e| Error::processing_interrupted(format!("Extraction worker failed: {}", e)))??;
    Ok((outcome, warnings))
}

fn print_human_summary(outcome: &JobOutcome, stats: &ProcessingStats) {
    let extraction = &outcome.extraction;

    println!("\n{}", "Extraction complete".green().bold());
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".dimmed());
    println!("Summary:");
    println!("   • Status column: {}", outcome.status_field);
    println!("   • Rows scanned: {}", extraction.rows_scanned);
    if let (Some(start), Some(end)) = (extraction.start_row, extraction.end_row) {
        println!("   • Region rows: {} (rows {}-{})", extraction.region_rows(), start, end);
    }
    println!("   • Records written: {}", stats.records_written);
    println!("   • Filtered out: {}", stats.records_filtered_out);
    println!("   • Sheets: {}", stats.sheets_written);
    println!(
        "   • Municipalities: {} ({} unresolved lookups)",
        extraction.distinct_municipalities, extraction.unresolved_municipalities
    );
    println!(
        "   • Nodes: {} ({} unresolved lookups)",
        extraction.distinct_nodes, extraction.unresolved_nodes
    );
    println!("   • Records/second: {:.0}", extraction.records_per_second());
    println!("   • Processing time: {}", HumanDuration(stats.processing_time));

    if outcome.report.sheets_replaced > 0 {
        println!(
            "{} {} sheet name collision(s), later municipality kept",
            "Warning:".yellow().bold(),
            outcome.report.sheets_replaced
        );
    }
    if let Some(geo_error) = &stats.geo_error {
        println!("{} KMZ not written: {}", "Warning:".yellow().bold(), geo_error);
    }
    if stats.warnings > 0 {
        println!("{} {} warning(s) logged", "Note:".cyan(), stats.warnings);
    }

    println!("\nOutput files:");
    for (filename, size) in &stats.output_sizes {
        println!(
            "   • {}: {}",
            filename.bold(),
            ProcessingStats::format_size(*size)
        );
    }
    println!();
}

fn print_json_summary(outcome: &JobOutcome, stats: &ProcessingStats) -> Result<()> {
    let kmz = match &outcome.kmz {
        Some(Ok(kmz)) => serde_json::json!({ "status": "written", "stats": kmz }),
        Some(Err(e)) => serde_json::json!({ "status": "failed", "error": e.to_string() }),
        None => serde_json::Value::Null,
    };
    let summary = serde_json::json!({
        "report_path": outcome.report_path,
        "status_field": outcome.status_field,
        "extraction": outcome.extraction,
        "report": outcome.report,
        "kmz": kmz,
        "warnings": stats.warnings,
        "processing_time_seconds": stats.processing_time.as_secs_f64(),
        "total_output_size_bytes": stats.total_output_size(),
    });

    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| Error::data_validation(format!("Failed to serialize summary: {}", e)))?;
    println!("{}", json);
    Ok(())
}

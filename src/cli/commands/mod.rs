//! Command implementations for the coverage extractor CLI
//!
//! Each command lives in its own module:
//! - `extract`: one extraction job with progress reporting and a run summary
//! - `reference`: listing of the built-in reference tables

pub mod extract;
pub mod reference;
pub mod shared;

pub use extract::{ChannelSink, ProgressEvent};
pub use shared::ProcessingStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Dispatch to the subcommand handler
///
/// Returns `Ok(())` without doing anything when no subcommand was given; the
/// binary prints help in that case before getting here.
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Extract(extract_args)) => {
            extract::run_extract(extract_args).await?;
            Ok(())
        }
        Some(Commands::Reference(reference_args)) => reference::run_reference(reference_args).await,
        None => Ok(()),
    }
}

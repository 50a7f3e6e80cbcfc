//! Region extraction engine
//!
//! This module streams the coverage dataset in bounded chunks, locates the
//! contiguous block of rows belonging to the target region, enriches each row
//! in that block and keeps the ones accepted by the status filter.
//!
//! # Architecture
//!
//! - [`state`]: the SEARCHING -> IN_REGION -> DONE tracker driven by region codes
//! - [`engine`]: the chunked scan, status-column probe and failure handling
//! - [`progress`]: the injected progress/log sink and its reporter
//! - [`stats`]: extraction statistics and the result handed to the writers
//! - [`naming`]: run-dated report paths and the derived KMZ path
//!
//! # Usage
//!
//! ```no_run
//! use coverage_extractor::ReferenceData;
//! use coverage_extractor::app::services::extractor::{ExtractionOptions, Extractor, NullSink};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # fn example() -> coverage_extractor::Result<()> {
//! let extractor = Extractor::new(Arc::new(ReferenceData::builtin()), ExtractionOptions::default());
//! let result = extractor.extract(Path::new("data/dbcopertura_CD.csv"), &NullSink)?;
//! println!("{} records", result.records.len());
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod naming;
pub mod progress;
pub mod state;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use engine::{ExtractionOptions, Extractor};
pub use naming::{dated_output_path, kmz_path_for};
pub use progress::{LogLevel, NullSink, ProgressSink, Reporter, ScaledSink};
pub use state::{RegionTracker, RowAction, ScanState};
pub use stats::{ExtractionResult, ExtractionStats};

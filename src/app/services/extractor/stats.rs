//! Extraction statistics and results

use crate::app::models::{EnrichedRecord, StatusField};
use serde::Serialize;
use std::time::Duration;

/// Counters collected during one scan
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionStats {
    /// Data rows read, including the row that ended the block
    pub rows_scanned: u64,

    /// Chunks read from the dataset
    pub chunks_read: u64,

    /// 1-based index of the first target-region row
    pub start_row: Option<u64>,

    /// 1-based index of the first row after the block (`None` at end of file)
    pub end_row: Option<u64>,

    /// Rows accepted by the status filter
    pub records_accepted: u64,

    /// Target-region rows rejected by the status filter
    pub records_filtered_out: u64,

    /// Accepted rows whose municipality code was not in the reference data
    pub unresolved_municipalities: u64,

    /// Accepted rows whose node id was not in the reference data
    pub unresolved_nodes: u64,

    /// Distinct municipality names among accepted rows
    pub distinct_municipalities: usize,

    /// Distinct node ids among accepted rows
    pub distinct_nodes: usize,

    /// Wall-clock time spent scanning
    pub elapsed: Duration,
}

impl ExtractionStats {
    /// Target-region rows seen, accepted or not
    pub fn region_rows(&self) -> u64 {
        self.records_accepted + self.records_filtered_out
    }

    /// Accepted records per second of scan time
    pub fn records_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds <= 0.0 {
            0.0
        } else {
            self.records_accepted as f64 / seconds
        }
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        let range = match (self.start_row, self.end_row) {
            (Some(start), Some(end)) => format!("rows {}-{}", start, end),
            (Some(start), None) => format!("rows {}-EOF", start),
            _ => "no block".to_string(),
        };
        format!(
            "{} records accepted ({} filtered out) from {} rows scanned, {}, {:.1}s",
            self.records_accepted,
            self.records_filtered_out,
            self.rows_scanned,
            range,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Accepted records of one scan, in dataset order
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub records: Vec<EnrichedRecord>,
    pub stats: ExtractionStats,
    /// Status column the dataset was read with
    pub status_field: StatusField,
}

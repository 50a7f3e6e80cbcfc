//! Chunked scan over the coverage dataset

use super::progress::Reporter;
use super::state::{RegionTracker, RowAction};
use super::stats::{ExtractionResult, ExtractionStats};
use super::ProgressSink;
use crate::app::models::{RawRow, RowSchema, StatusField};
use crate::app::services::record_enricher::RecordEnricher;
use crate::app::services::reference_data::ReferenceData;
use crate::app::services::status_filter::StatusFilter;
use crate::constants::{
    CSV_DELIMITER, DEFAULT_CHUNK_SIZE, DEFAULT_TARGET_REGION, PROGRESS_CHUNK_INTERVAL,
    PROGRESS_RECORD_INTERVAL, columns,
};
use crate::{Error, Result};
use csv::{Reader, ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Parameters of one scan
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOptions {
    /// Two-character region code to extract
    pub target_region: String,
    /// Rows read per batch
    pub chunk_size: usize,
    /// Status filter applied to rows in the block
    pub filter: StatusFilter,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            target_region: DEFAULT_TARGET_REGION.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            filter: StatusFilter::All,
        }
    }
}

/// Streams a dataset and collects the enriched rows of one region
#[derive(Debug, Clone)]
pub struct Extractor {
    reference: Arc<ReferenceData>,
    options: ExtractionOptions,
}

impl Extractor {
    pub fn new(reference: Arc<ReferenceData>, options: ExtractionOptions) -> Self {
        Self { reference, options }
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Detect the status column from the header and a single record
    ///
    /// The reader is dropped afterwards; the main scan reopens the file.
    pub fn probe_status_field(&self, input_path: &Path) -> Result<StatusField> {
        let mut reader = open_reader(input_path)?;
        let schema = read_schema(&mut reader, input_path)?;

        let mut first = StringRecord::new();
        let has_rows = reader
            .read_record(&mut first)
            .map_err(|e| read_error(input_path, 1, e))?;
        if !has_rows {
            debug!("Dataset {} has a header but no rows", input_path.display());
        }

        Ok(StatusField::detect(&schema))
    }

    /// Run the full scan
    ///
    /// Fails when the input is missing or unreadable, when the target region
    /// never appears, or when the filter rejects every row of the block. No
    /// partial result is returned on failure.
    pub fn extract(&self, input_path: &Path, sink: &dyn ProgressSink) -> Result<ExtractionResult> {
        let reporter = Reporter::new(sink);
        let started = Instant::now();
        let target = self.options.target_region.trim();
        let chunk_size = self.options.chunk_size.max(1);

        if !input_path.is_file() {
            return Err(Error::input_not_found(input_path.display().to_string()));
        }

        reporter.info(format!(
            "Extracting region {} ({}) from {}",
            target,
            self.reference.resolve_region(target),
            input_path.display()
        ));
        reporter.debug(format!("Chunk size: {} rows", chunk_size));

        let status_field = self.probe_status_field(input_path)?;
        reporter.info(format!("Status column detected: {}", status_field));

        let file_len = std::fs::metadata(input_path)
            .map_err(|e| Error::io(format!("Failed to stat {}", input_path.display()), e))?
            .len();
        let mut reader = open_reader(input_path)?;
        let schema = read_schema(&mut reader, input_path)?;

        let enricher = RecordEnricher::new(&self.reference, status_field);
        let filter = &self.options.filter;
        let mut tracker = RegionTracker::new(target);
        let mut stats = ExtractionStats::default();
        let mut records = Vec::new();
        let mut municipalities: HashSet<String> = HashSet::new();
        let mut nodes: HashSet<String> = HashSet::new();
        let mut batch: Vec<StringRecord> = Vec::new();

        reporter.progress(0.0, format!("Searching for region {}", target));

        'scan: loop {
            if reporter.is_abandoned() {
                return Err(Error::processing_interrupted(
                    "Extraction abandoned by caller",
                ));
            }

            let filled = read_batch(&mut reader, &mut batch, chunk_size, input_path, &stats)?;
            if filled == 0 {
                break;
            }
            stats.chunks_read += 1;

            if (stats.chunks_read - 1) % PROGRESS_CHUNK_INTERVAL == 0 {
                let percent = scan_percent(reader.position().byte(), file_len);
                reporter.progress(
                    percent,
                    format!(
                        "Chunk {} - rows scanned: {}",
                        stats.chunks_read, stats.rows_scanned
                    ),
                );
            }

            for record in &batch[..filled] {
                stats.rows_scanned += 1;
                let row = RawRow::new(&schema, record);

                match tracker.observe(row.region(), stats.rows_scanned) {
                    RowAction::Skip => continue,
                    RowAction::Stop => {
                        reporter.info(format!(
                            "Region {} block ends at row {}",
                            target, stats.rows_scanned
                        ));
                        break 'scan;
                    }
                    RowAction::Process => {
                        if tracker.start_row() == Some(stats.rows_scanned) {
                            reporter.info(format!(
                                "Region {} block starts at row {}",
                                target, stats.rows_scanned
                            ));
                        }
                    }
                }

                if !filter.accepts(enricher.status_code(&row)) {
                    stats.records_filtered_out += 1;
                    continue;
                }

                let enriched = enricher.enrich(&row);
                if !self.reference.contains_municipality(&enriched.municipality_code) {
                    stats.unresolved_municipalities += 1;
                }
                if !enriched.has_node_location() {
                    stats.unresolved_nodes += 1;
                }
                if !municipalities.contains(&enriched.municipality) {
                    municipalities.insert(enriched.municipality.clone());
                }
                if !nodes.contains(&enriched.node_id) {
                    nodes.insert(enriched.node_id.clone());
                }
                records.push(enriched);

                if records.len() % PROGRESS_RECORD_INTERVAL == 0 {
                    let percent = scan_percent(reader.position().byte(), file_len);
                    reporter.progress(percent, format!("Records extracted: {}", records.len()));
                }
            }

            if filled < chunk_size {
                break;
            }
        }

        stats.start_row = tracker.start_row();
        stats.end_row = tracker.end_row();
        stats.records_accepted = records.len() as u64;
        stats.distinct_municipalities = municipalities.len();
        stats.distinct_nodes = nodes.len();
        stats.elapsed = started.elapsed();

        if stats.start_row.is_none() {
            return Err(Error::no_region_data(target, stats.rows_scanned));
        }
        if records.is_empty() {
            return Err(Error::no_records_accepted(target, stats.records_filtered_out));
        }
        if stats.unresolved_municipalities > 0 || stats.unresolved_nodes > 0 {
            reporter.warn(format!(
                "{} record(s) with unknown municipality, {} with unknown node",
                stats.unresolved_municipalities, stats.unresolved_nodes
            ));
        }

        reporter.info(format!("Extraction complete: {}", stats.summary()));
        reporter.progress(100.0, "Extraction complete");

        Ok(ExtractionResult {
            records,
            stats,
            status_field,
        })
    }
}

fn open_reader(path: &Path) -> Result<Reader<File>> {
    if !path.is_file() {
        return Err(Error::input_not_found(path.display().to_string()));
    }
    ReaderBuilder::new()
        .delimiter(CSV_DELIMITER)
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|e| {
            Error::csv_read(
                path.display().to_string(),
                "Failed to open dataset",
                Some(e),
            )
        })
}

fn read_schema(reader: &mut Reader<File>, path: &Path) -> Result<RowSchema> {
    let headers = reader.headers().map_err(|e| {
        Error::csv_read(
            path.display().to_string(),
            "Failed to read header row",
            Some(e),
        )
    })?;
    let schema = RowSchema::from_headers(headers);

    if !schema.contains(columns::REGION) {
        return Err(Error::invalid_format(
            path.display().to_string(),
            format!("Header has no {} column", columns::REGION),
        ));
    }
    Ok(schema)
}

/// Fill `batch` with up to `chunk_size` records, reusing its allocations
fn read_batch(
    reader: &mut Reader<File>,
    batch: &mut Vec<StringRecord>,
    chunk_size: usize,
    path: &Path,
    stats: &ExtractionStats,
) -> Result<usize> {
    let mut filled = 0;
    while filled < chunk_size {
        if filled == batch.len() {
            batch.push(StringRecord::new());
        }
        let row_index = stats.rows_scanned + filled as u64 + 1;
        let more = reader
            .read_record(&mut batch[filled])
            .map_err(|e| read_error(path, row_index, e))?;
        if !more {
            break;
        }
        filled += 1;
    }
    Ok(filled)
}

fn read_error(path: &Path, row_index: u64, error: csv::Error) -> Error {
    Error::csv_read(
        path.display().to_string(),
        format!("Malformed data at row {}: {}", row_index, error),
        Some(error),
    )
}

fn scan_percent(position: u64, file_len: u64) -> f64 {
    if file_len == 0 {
        return 0.0;
    }
    (position as f64 / file_len as f64 * 100.0).min(100.0)
}

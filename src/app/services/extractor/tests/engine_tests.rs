//! Tests for the chunked extraction scan

use super::*;
use crate::app::models::StatusField;
use crate::app::services::extractor::{ExtractionOptions, Extractor, NullSink};
use crate::app::services::reference_data::ReferenceData;
use crate::app::services::status_filter::StatusFilter;
use crate::{Error, ErrorCategory};
use std::sync::Arc;

fn extractor(chunk_size: usize, filter: StatusFilter) -> Extractor {
    Extractor::new(
        Arc::new(ReferenceData::builtin()),
        ExtractionOptions {
            target_region: "02".to_string(),
            chunk_size,
            filter,
        },
    )
}

fn building_ids(records: &[crate::EnrichedRecord]) -> Vec<&str> {
    records.iter().map(|r| r.building_id.as_str()).collect()
}

/// Test the three-region layout without a filter
///
/// Ensures exactly the four region-02 rows are accepted with a block
/// starting at row 4 and the first foreign row at 8.
#[test]
fn test_three_region_dataset_no_filter() {
    let (_dir, path) = create_test_dataset(&three_region_rows());
    let result = extractor(1000, StatusFilter::All)
        .extract(&path, &NullSink)
        .unwrap();

    assert_eq!(result.records.len(), 4);
    assert_eq!(building_ids(&result.records), vec!["B4", "B5", "B6", "B7"]);
    assert_eq!(result.stats.start_row, Some(4));
    assert_eq!(result.stats.end_row, Some(8));
    assert_eq!(result.stats.rows_scanned, 8);
    assert_eq!(result.stats.records_accepted, 4);
    assert_eq!(result.status_field, StatusField::Unit);
}

/// Test filtering to statuses found only in rows 2 and 4 of the block
///
/// Ensures the accepted rows keep their original relative order.
#[test]
fn test_filter_keeps_matching_rows_in_order() {
    let (_dir, path) = create_test_dataset(&three_region_rows());
    let result = extractor(1000, StatusFilter::from_codes(["302"]))
        .extract(&path, &NullSink)
        .unwrap();

    assert_eq!(building_ids(&result.records), vec!["B5", "B7"]);
    assert_eq!(result.stats.records_filtered_out, 2);
    assert!(result.records.iter().all(|r| r.status_code == "302"));
}

#[test]
fn test_missing_region_is_no_match() {
    let rows = vec![
        ("01", "001001", "102", "TOXXA"),
        ("03", "015146", "102", "MIXXA"),
    ];
    let (_dir, path) = create_test_dataset(&rows);
    let error = extractor(1000, StatusFilter::All)
        .extract(&path, &NullSink)
        .unwrap_err();

    assert!(matches!(
        error,
        Error::NoRegionData {
            rows_scanned: 2,
            ..
        }
    ));
    assert_eq!(error.category(), ErrorCategory::NoMatch);
}

#[test]
fn test_empty_dataset_is_no_match() {
    let (_dir, path) = create_test_dataset(&[]);
    let error = extractor(1000, StatusFilter::All)
        .extract(&path, &NullSink)
        .unwrap_err();

    assert_eq!(error.category(), ErrorCategory::NoMatch);
}

#[test]
fn test_filter_rejecting_everything_is_no_match() {
    let (_dir, path) = create_test_dataset(&three_region_rows());
    let error = extractor(1000, StatusFilter::from_codes(["999"]))
        .extract(&path, &NullSink)
        .unwrap_err();

    assert!(matches!(
        error,
        Error::NoRecordsAccepted {
            filtered_out: 4,
            ..
        }
    ));
    assert_eq!(error.category(), ErrorCategory::NoMatch);
}

/// Test single-block scanning
///
/// Ensures target rows after the end of the first block are never read.
#[test]
fn test_scan_stops_after_first_block() {
    let rows = vec![
        ("01", "001001", "102", "TOXXA"),
        ("02", "007003", "102", "AOCUA"),
        ("03", "015146", "102", "MIXXA"),
        ("02", "007003", "302", "AOCUA"),
        ("02", "007003", "302", "AOCUA"),
    ];
    let (_dir, path) = create_test_dataset(&rows);
    let result = extractor(1, StatusFilter::All)
        .extract(&path, &NullSink)
        .unwrap();

    assert_eq!(building_ids(&result.records), vec!["B2"]);
    assert_eq!(result.stats.rows_scanned, 3);
    assert_eq!(result.stats.end_row, Some(3));
}

#[test]
fn test_block_running_to_end_of_file() {
    let rows = vec![
        ("01", "001001", "102", "TOXXA"),
        ("02", "007003", "102", "AOCUA"),
        ("02", "007003", "302", "AOCUA"),
    ];
    let (_dir, path) = create_test_dataset(&rows);
    let result = extractor(2, StatusFilter::All)
        .extract(&path, &NullSink)
        .unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.stats.start_row, Some(2));
    assert_eq!(result.stats.end_row, None);
    assert_eq!(result.stats.rows_scanned, 3);
}

#[test]
fn test_results_independent_of_chunk_size() {
    let (_dir, path) = create_test_dataset(&three_region_rows());
    let baseline = extractor(1000, StatusFilter::All)
        .extract(&path, &NullSink)
        .unwrap();

    for chunk_size in [1, 2, 3, 4, 7, 8, 9] {
        let result = extractor(chunk_size, StatusFilter::All)
            .extract(&path, &NullSink)
            .unwrap();
        assert_eq!(result.records, baseline.records, "chunk size {}", chunk_size);
        assert_eq!(result.stats.start_row, baseline.stats.start_row);
        assert_eq!(result.stats.end_row, baseline.stats.end_row);
        assert_eq!(result.stats.rows_scanned, baseline.stats.rows_scanned);
    }
}

#[test]
fn test_rows_are_enriched() {
    let (_dir, path) = create_test_dataset(&three_region_rows());
    let result = extractor(1000, StatusFilter::All)
        .extract(&path, &NullSink)
        .unwrap();

    let first = &result.records[0];
    assert_eq!(first.municipality, "Aosta");
    assert_eq!(first.municipality_code, "007003");
    assert_eq!(first.node_name, "POP_AO_11_VERRES");
    assert_eq!(first.coordinates, "N45.4_E7.4");

    assert_eq!(result.stats.distinct_municipalities, 3);
    assert_eq!(result.stats.distinct_nodes, 3);
    assert_eq!(result.stats.unresolved_municipalities, 0);
    assert_eq!(result.stats.unresolved_nodes, 0);
}

#[test]
fn test_unresolved_lookups_are_counted_not_fatal() {
    let rows = vec![
        ("02", "999999", "102", "NOPE1"),
        ("02", "007003", "102", "AOCUA"),
    ];
    let (_dir, path) = create_test_dataset(&rows);
    let result = extractor(1000, StatusFilter::All)
        .extract(&path, &NullSink)
        .unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].municipality, "Municipality unknown (999999)");
    assert_eq!(result.stats.unresolved_municipalities, 1);
    assert_eq!(result.stats.unresolved_nodes, 1);
}

#[test]
fn test_missing_input_file() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.csv");
    let error = extractor(1000, StatusFilter::All)
        .extract(&path, &NullSink)
        .unwrap_err();

    assert_eq!(error.category(), ErrorCategory::InputNotFound);
}

#[test]
fn test_malformed_row_is_read_failure() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.csv");
    let mut content = format!("{}\n", TEST_HEADER);
    content.push_str(&render_rows(&three_region_rows()[..5]));
    content.push_str("S6|02|007003\n");
    std::fs::write(&path, content).unwrap();

    let error = extractor(1000, StatusFilter::All)
        .extract(&path, &NullSink)
        .unwrap_err();

    assert_eq!(error.category(), ErrorCategory::ReadFailure);
    assert!(error.to_string().contains("row 6"));
}

#[test]
fn test_missing_region_column_is_invalid_format() {
    let (_dir, path) = create_dataset_with_header(
        "ID_SCALA|REGION|COMUNE|INDIRIZZO|CIVICO|ID_BUILDING|COORDINATE_BUILDING|POP|STATO_UI",
        &three_region_rows(),
    );
    let error = extractor(1000, StatusFilter::All)
        .extract(&path, &NullSink)
        .unwrap_err();

    assert!(matches!(error, Error::InvalidFormat { .. }));
    assert_eq!(error.category(), ErrorCategory::ReadFailure);
}

#[test]
fn test_older_schema_status_column() {
    let (_dir, path) = create_dataset_with_header(
        "ID_SCALA|REGIONE|COMUNE|INDIRIZZO|CIVICO|ID_BUILDING|COORDINATE_BUILDING|POP|STATO_BUILDING",
        &three_region_rows(),
    );
    let extractor = extractor(1000, StatusFilter::from_codes(["302"]));

    assert_eq!(
        extractor.probe_status_field(&path).unwrap(),
        StatusField::Building
    );
    let result = extractor.extract(&path, &NullSink).unwrap();
    assert_eq!(result.status_field, StatusField::Building);
    assert_eq!(building_ids(&result.records), vec!["B5", "B7"]);
}

#[test]
fn test_progress_events_are_bounded() {
    let rows: Vec<TestRow> = std::iter::repeat_n(("02", "007003", "102", "AOCUA"), 2500).collect();
    let (_dir, path) = create_test_dataset(&rows);
    let sink = RecordingSink::default();
    let result = extractor(100, StatusFilter::All).extract(&path, &sink).unwrap();
    assert_eq!(result.records.len(), 2500);

    let progress = sink.progress.lock().unwrap();
    assert!(progress.iter().all(|(p, _)| (0.0..=100.0).contains(p)));
    assert_eq!(progress.last().map(|(p, _)| *p), Some(100.0));
    assert!(progress.iter().any(|(_, m)| m == "Records extracted: 1000"));
    assert!(progress.iter().any(|(_, m)| m == "Records extracted: 2000"));

    let logs = sink.logs.lock().unwrap();
    assert!(logs.iter().any(|(_, m)| m.contains("block starts at row 1")));
}

#[test]
fn test_failing_sink_does_not_abort() {
    let (_dir, path) = create_test_dataset(&three_region_rows());
    let result = extractor(2, StatusFilter::All)
        .extract(&path, &FailingSink)
        .unwrap();

    assert_eq!(result.records.len(), 4);
}

#[test]
fn test_abandoned_caller_discards_scan() {
    let (_dir, path) = create_test_dataset(&three_region_rows());
    let sink = AbandonedSink::default();
    sink.abandoned
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let error = extractor(2, StatusFilter::All)
        .extract(&path, &sink)
        .unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Interrupted);
}

/// Test the block-start log with a filter that rejects the first block row
///
/// Ensures the start is reported once, at the searching to in-region
/// transition, and matches the row the stats carry.
#[test]
fn test_block_start_logged_once_at_transition() {
    let (_dir, path) = create_test_dataset(&three_region_rows());
    let sink = RecordingSink::default();
    let result = extractor(2, StatusFilter::from_codes(["302"]))
        .extract(&path, &sink)
        .unwrap();

    assert_eq!(result.stats.start_row, Some(4));
    let logs = sink.logs.lock().unwrap();
    let starts: Vec<&String> = logs
        .iter()
        .map(|(_, m)| m)
        .filter(|m| m.contains("block starts at row"))
        .collect();
    assert_eq!(starts.len(), 1);
    assert!(starts[0].ends_with("block starts at row 4"));
}

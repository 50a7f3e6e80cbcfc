//! Tests for the multi-sheet workbook writer

use super::*;
use crate::ErrorCategory;
use crate::app::services::report_writer::ReportWriter;
use crate::app::services::extractor::tests::AbandonedSink;
use crate::app::services::report_writer::layout::clamp_width;
use crate::Error;
use std::fs;
use std::sync::atomic::Ordering;
use tempfile::TempDir;

fn dir_entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_one_sheet_per_municipality_sorted() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.xlsx");
    let records = vec![
        create_test_record("Verrès", "B1", "102"),
        create_test_record("Aosta", "B2", "302"),
        create_test_record("Châtillon", "B3", "102"),
        create_test_record("Aosta", "B4", "102"),
    ];

    let stats = ReportWriter::default().generate(&records, &path).unwrap();

    assert_eq!(stats.sheets_written, 3);
    assert_eq!(stats.records_written, 4);
    assert_eq!(stats.sheets_replaced, 0);
    assert!(stats.file_size > 0);
    assert_eq!(sheet_names(&path), vec!["Aosta", "Châtillon", "Verrès"]);
    assert_eq!(sheet_row_count(&path, 1), 3);
    assert_eq!(sheet_row_count(&path, 2), 2);
    assert_eq!(sheet_row_count(&path, 3), 2);
}

#[test]
fn test_headers_and_values_written() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.xlsx");
    let records = vec![create_test_record("Aosta", "BUILDING-42", "302")];

    ReportWriter::default().generate(&records, &path).unwrap();

    let strings = read_entry(&path, "xl/sharedStrings.xml");
    for header in crate::constants::REPORT_COLUMNS {
        assert!(strings.contains(header), "missing header {}", header);
    }
    assert!(strings.contains("BUILDING-42"));
    assert!(strings.contains("POP_AO_11_VERRES"));
}

/// Test duplicate sanitized sheet names
///
/// Ensures two municipalities mapping to one sheet name produce a single
/// sheet holding the later group.
#[test]
fn test_colliding_sheet_names_last_wins() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.xlsx");
    let records = vec![
        create_test_record("Saint/Denis", "B1", "102"),
        create_test_record("Saint:Denis", "B2", "102"),
        create_test_record("Saint:Denis", "B3", "102"),
        create_test_record("Aosta", "B4", "102"),
    ];

    let stats = ReportWriter::default().generate(&records, &path).unwrap();

    assert_eq!(stats.sheets_written, 2);
    assert_eq!(stats.sheets_replaced, 1);
    assert_eq!(stats.records_written, 3);
    assert_eq!(sheet_names(&path), vec!["Aosta", "Saint-Denis"]);
    assert_eq!(sheet_row_count(&path, 2), 3);
}

#[test]
fn test_creates_missing_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested/deeper/report.xlsx");
    let records = vec![create_test_record("Aosta", "B1", "102")];

    ReportWriter::default().generate(&records, &path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_unwritable_destination_fails_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not_a_dir");
    std::fs::write(&blocker, "file in the way").unwrap();
    let path = blocker.join("report.xlsx");
    let records = vec![create_test_record("Aosta", "B1", "102")];

    let error = ReportWriter::default().generate(&records, &path).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::OutputWrite);
    assert!(!path.exists());
}

/// Test a workbook write that fails after staging
///
/// Ensures the earlier same-day report is left intact and no temp file
/// remains beside it.
#[test]
fn test_failed_write_keeps_existing_report() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.xlsx");
    fs::write(&path, "earlier report").unwrap();
    let mut record = create_test_record("Aosta", "B1", "102");
    record.address = "X".repeat(40_000);

    let error = ReportWriter::default().generate(&[record], &path).unwrap_err();

    assert!(matches!(error, Error::ReportWrite { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), "earlier report");
    assert_eq!(dir_entries(temp_dir.path()), vec!["report.xlsx"]);
}

/// Test a caller that goes away while the workbook is being written
///
/// Ensures the finished workbook is discarded instead of replacing the
/// earlier report.
#[test]
fn test_abandoned_write_keeps_existing_report() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.xlsx");
    fs::write(&path, "earlier report").unwrap();
    let records = vec![create_test_record("Aosta", "B1", "102")];
    let sink = AbandonedSink::default();
    sink.abandoned.store(true, Ordering::SeqCst);

    let error = ReportWriter::new(&sink).generate(&records, &path).unwrap_err();

    assert!(matches!(error, Error::ProcessingInterrupted { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), "earlier report");
    assert_eq!(dir_entries(temp_dir.path()), vec!["report.xlsx"]);
}

#[test]
fn test_staged_workbook_appears_on_commit() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.xlsx");
    let records = vec![create_test_record("Aosta", "B1", "102")];

    let (staged, stats) = ReportWriter::default().stage(&records, &path).unwrap();
    assert!(!path.exists());
    assert!(stats.file_size > 0);

    staged.commit().unwrap();
    assert_eq!(sheet_names(&path), vec!["Aosta"]);
    assert_eq!(fs::metadata(&path).unwrap().len(), stats.file_size);
}

#[test]
fn test_empty_record_set_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.xlsx");

    let error = ReportWriter::default().generate(&[], &path).unwrap_err();
    assert_eq!(error.category(), ErrorCategory::OutputWrite);
    assert!(!path.exists());
}

#[test]
fn test_column_width_clamp() {
    assert_eq!(clamp_width(0), 10);
    assert_eq!(clamp_width(8), 10);
    assert_eq!(clamp_width(9), 11);
    assert_eq!(clamp_width(48), 50);
    assert_eq!(clamp_width(200), 50);
}

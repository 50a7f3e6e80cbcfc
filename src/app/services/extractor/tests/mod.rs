//! Shared fixtures for extraction engine tests

use crate::app::services::extractor::{LogLevel, ProgressSink};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

pub mod engine_tests;

/// Header used by the test datasets
pub const TEST_HEADER: &str =
    "ID_SCALA|REGIONE|COMUNE|INDIRIZZO|CIVICO|ID_BUILDING|COORDINATE_BUILDING|POP|STATO_UI";

/// One dataset row: (region, municipality code, status, node id)
pub type TestRow<'a> = (&'a str, &'a str, &'a str, &'a str);

/// Render rows as pipe-delimited lines, numbering ids from 1
pub fn render_rows(rows: &[TestRow]) -> String {
    let mut content = String::new();
    for (index, (region, municipality, status, node)) in rows.iter().enumerate() {
        content.push_str(&format!(
            "S{id}|{region}|{municipality}|VIA TEST|{id}|B{id}|N45.{id}_E7.{id}|{node}|{status}\n",
            id = index + 1,
        ));
    }
    content
}

/// Write a dataset with the standard header into a temp dir
pub fn create_test_dataset(rows: &[TestRow]) -> (TempDir, PathBuf) {
    create_dataset_with_header(TEST_HEADER, rows)
}

/// Write a dataset with a custom header into a temp dir
pub fn create_dataset_with_header(header: &str, rows: &[TestRow]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dataset.csv");
    fs::write(&path, format!("{}\n{}", header, render_rows(rows))).unwrap();
    (temp_dir, path)
}

/// Rows for the three-region layout: 3 x "01", 4 x "02", 2 x "03"
pub fn three_region_rows() -> Vec<TestRow<'static>> {
    vec![
        ("01", "001001", "102", "TOXXA"),
        ("01", "001002", "302", "TOXXA"),
        ("01", "001003", "102", "TOXXA"),
        ("02", "007003", "102", "AOCUA"),
        ("02", "007003", "302", "AOCUA"),
        ("02", "007073", "101", "AOAGA"),
        ("02", "007020", "302", "AOAWA"),
        ("03", "015146", "302", "MIXXA"),
        ("03", "015146", "102", "MIXXA"),
    ]
}

/// Sink that records every event
#[derive(Default)]
pub struct RecordingSink {
    pub progress: Mutex<Vec<(f64, String)>>,
    pub logs: Mutex<Vec<(LogLevel, String)>>,
}

impl ProgressSink for RecordingSink {
    fn on_progress(&self, percent: f64, message: &str) -> anyhow::Result<()> {
        self.progress
            .lock()
            .unwrap()
            .push((percent, message.to_string()));
        Ok(())
    }

    fn on_log(&self, level: LogLevel, message: &str) -> anyhow::Result<()> {
        self.logs.lock().unwrap().push((level, message.to_string()));
        Ok(())
    }
}

/// Sink whose every call fails
pub struct FailingSink;

impl ProgressSink for FailingSink {
    fn on_progress(&self, _percent: f64, _message: &str) -> anyhow::Result<()> {
        anyhow::bail!("progress display closed")
    }

    fn on_log(&self, _level: LogLevel, _message: &str) -> anyhow::Result<()> {
        anyhow::bail!("log view closed")
    }
}

/// Sink that reports the caller as gone
#[derive(Default)]
pub struct AbandonedSink {
    pub abandoned: AtomicBool,
}

impl ProgressSink for AbandonedSink {
    fn on_progress(&self, _percent: f64, _message: &str) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_log(&self, _level: LogLevel, _message: &str) -> anyhow::Result<()> {
        Ok(())
    }

    fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }
}

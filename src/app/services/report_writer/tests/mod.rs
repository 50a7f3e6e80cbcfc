//! Shared fixtures for workbook tests

use crate::app::models::EnrichedRecord;
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub mod writer_tests;

/// Create an enriched record with the fields the writer groups on
pub fn create_test_record(municipality: &str, building_id: &str, status: &str) -> EnrichedRecord {
    EnrichedRecord {
        municipality: municipality.to_string(),
        municipality_code: "007003".to_string(),
        parcel_id: String::new(),
        address: "VIA ROMA".to_string(),
        house_number: "1".to_string(),
        building_id: building_id.to_string(),
        coordinates: "N45.737649_E7.320166".to_string(),
        status_code: status.to_string(),
        node_id: "AOCUA".to_string(),
        node_name: "POP_AO_11_VERRES".to_string(),
        node_municipality: "Verrès".to_string(),
        node_latitude: Some(45.661442),
        node_longitude: Some(7.69103),
        total_units: "2".to_string(),
        last_modified: "2025-07-01".to_string(),
        last_status_change: String::new(),
    }
}

/// Read one entry of a zip-based document as text
pub fn read_entry(path: &Path, entry: &str) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut file = archive.by_name(entry).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

/// Sheet names of a saved workbook, in tab order
pub fn sheet_names(path: &Path) -> Vec<String> {
    let workbook = read_entry(path, "xl/workbook.xml");
    let re = Regex::new(r#"<sheet name="([^"]+)""#).unwrap();
    re.captures_iter(&workbook)
        .map(|c| c[1].to_string())
        .collect()
}

/// Number of rows (header included) in the n-th sheet (1-based)
pub fn sheet_row_count(path: &Path, sheet: usize) -> usize {
    let xml = read_entry(path, &format!("xl/worksheets/sheet{}.xml", sheet));
    xml.matches("<row ").count()
}

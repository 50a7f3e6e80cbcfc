//! Shared fixtures for KMZ export tests

use crate::app::models::EnrichedRecord;
use chrono::{NaiveDate, NaiveDateTime};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;


/// Create a site record
pub fn create_site(
    municipality: &str,
    building_id: &str,
    status: &str,
    node_id: &str,
    coordinates: &str,
) -> EnrichedRecord {
    EnrichedRecord {
        municipality: municipality.to_string(),
        municipality_code: "007003".to_string(),
        parcel_id: String::new(),
        address: "PIAZZA CHANOUX".to_string(),
        house_number: "1".to_string(),
        building_id: building_id.to_string(),
        coordinates: coordinates.to_string(),
        status_code: status.to_string(),
        node_id: node_id.to_string(),
        node_name: format!("NODE {}", node_id),
        node_municipality: String::new(),
        node_latitude: None,
        node_longitude: None,
        total_units: "1".to_string(),
        last_modified: String::new(),
        last_status_change: String::new(),
    }
}

/// Fixed generation timestamp for deterministic documents
pub fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 7, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

/// Read the KML entry of a KMZ archive
pub fn read_kml(path: &Path) -> String {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name("doc.kml").unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

/// Text content of every element named `tag`, in document order
pub fn element_texts(kml: &str, tag: &[u8]) -> Vec<String> {
    let mut reader = Reader::from_str(kml);
    reader.config_mut().trim_text(true);

    let mut values = Vec::new();
    let mut inside = false;
    loop {
        match reader.read_event().unwrap() {
            Event::Start(e) if e.name().as_ref() == tag => inside = true,
            Event::Text(t) if inside => values.push(t.decode().unwrap().into_owned()),
            Event::CData(t) if inside => values.push(t.decode().unwrap().into_owned()),
            Event::End(e) if e.name().as_ref() == tag => inside = false,
            Event::Eof => break,
            _ => {}
        }
    }
    values
}

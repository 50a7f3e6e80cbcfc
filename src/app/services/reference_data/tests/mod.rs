//! Shared fixtures for reference data tests

use crate::app::models::NodeInfo;
use crate::app::services::reference_data::ReferenceData;


/// Create a node with the given name and coordinates
pub fn create_test_node(name: &str, municipality: &str, lat: f64, lon: f64) -> NodeInfo {
    NodeInfo {
        name: name.to_string(),
        municipality: municipality.to_string(),
        latitude: lat,
        longitude: lon,
    }
}

/// Small store with two municipalities, three nodes and two statuses
pub fn create_test_reference() -> ReferenceData {
    ReferenceData::new()
        .with_region("02", "Valle d'Aosta")
        .with_municipality("007003", "Aosta")
        .with_municipality("007073", "Verrès")
        .with_node(
            "AOCUA",
            create_test_node("POP_AO_11_VERRES", "Verrès", 45.661442, 7.69103),
        )
        .with_node(
            "AOAGA",
            create_test_node("POP_AO_07_DONNAS", "Donnas", 45.603989, 7.775326),
        )
        .with_node(
            "AOALA",
            create_test_node("POP_AO_04_AYAS", "Ayas", 45.797209, 7.695367),
        )
        .with_status("102", "FTTH site")
        .with_status("302", "Public administration site (PAC/PAL)")
}

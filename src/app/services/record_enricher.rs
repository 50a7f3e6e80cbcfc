//! Row enrichment against the reference data store
//!
//! Turns one raw dataset row into an [`EnrichedRecord`]: name fields are
//! copied verbatim, the municipality code and node id are resolved, and the
//! status code is read from the column detected for the dataset. Enrichment
//! never fails; missing fields degrade to empty strings and unresolved
//! lookups degrade to sentinel values.

use crate::app::models::{EnrichedRecord, RawRow, StatusField};
use crate::app::services::reference_data::ReferenceData;
use crate::constants::columns;

/// Fallback node name for ids missing from the store
pub fn unknown_node_name(node_id: &str) -> String {
    format!("Node unknown ({})", node_id)
}

/// Fallback municipality for nodes missing from the store
pub const UNKNOWN_NODE_MUNICIPALITY: &str = "Node municipality unknown";

/// Enriches rows of one dataset
///
/// The status column is fixed at construction; rows are not re-probed.
#[derive(Debug, Clone, Copy)]
pub struct RecordEnricher<'a> {
    reference: &'a ReferenceData,
    status_field: StatusField,
}

impl<'a> RecordEnricher<'a> {
    pub fn new(reference: &'a ReferenceData, status_field: StatusField) -> Self {
        Self {
            reference,
            status_field,
        }
    }

    pub fn status_field(&self) -> StatusField {
        self.status_field
    }

    /// Read the trimmed status code of a row without enriching it
    pub fn status_code<'r>(&self, row: &RawRow<'r>) -> &'r str {
        row.get_or_empty(self.status_field.column_name()).trim()
    }

    /// Build the enriched record for one row
    pub fn enrich(&self, row: &RawRow<'_>) -> EnrichedRecord {
        let municipality_code = row.get_or_empty(columns::MUNICIPALITY).trim();
        let node_id = row.get_or_empty(columns::NODE).trim();
        let node = self.reference.resolve_node(node_id);

        EnrichedRecord {
            municipality: self.reference.resolve_municipality(municipality_code),
            municipality_code: municipality_code.to_string(),
            parcel_id: row.get_or_empty(columns::PARCEL).to_string(),
            address: row.get_or_empty(columns::ADDRESS).to_string(),
            house_number: row.get_or_empty(columns::HOUSE_NUMBER).to_string(),
            building_id: row.get_or_empty(columns::BUILDING_ID).to_string(),
            coordinates: row.get_or_empty(columns::COORDINATES).to_string(),
            status_code: self.status_code(row).to_string(),
            node_id: node_id.to_string(),
            node_name: node.map_or_else(|| unknown_node_name(node_id), |info| info.name.clone()),
            node_municipality: node.map_or_else(
                || UNKNOWN_NODE_MUNICIPALITY.to_string(),
                |info| info.municipality.clone(),
            ),
            node_latitude: node.map(|info| info.latitude),
            node_longitude: node.map(|info| info.longitude),
            total_units: row.get_or_empty(columns::TOTAL_UNITS).to_string(),
            last_modified: row.get_or_empty(columns::LAST_MODIFIED).to_string(),
            last_status_change: row.get_or_empty(columns::LAST_STATUS_CHANGE).to_string(),
        }
    }
}

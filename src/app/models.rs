//! Data models for coverage extraction
//!
//! This module contains the row view used while streaming the dataset, the
//! reference-data value types and the enriched record handed to the report
//! and geo exporters.

use crate::constants::{REPORT_COLUMNS, columns};
use csv::StringRecord;
use serde::Serialize;
use std::collections::HashMap;

// =============================================================================
// Raw Rows
// =============================================================================

/// Column layout of a dataset, resolved once from its header row
#[derive(Debug, Clone, PartialEq)]
pub struct RowSchema {
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl RowSchema {
    /// Build a schema from column names in file order
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<String> = names
            .into_iter()
            .map(|name| name.as_ref().trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let mut index = HashMap::with_capacity(columns.len());
        for (position, name) in columns.iter().enumerate() {
            // First occurrence wins for duplicated header names
            index.entry(name.clone()).or_insert(position);
        }
        Self { columns, index }
    }

    /// Build a schema from a CSV header record
    pub fn from_headers(headers: &StringRecord) -> Self {
        Self::new(headers.iter())
    }

    /// Position of a column, if present
    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    /// Check whether the dataset carries a column
    pub fn contains(&self, column: &str) -> bool {
        self.index.contains_key(column)
    }

    /// Column names in file order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Borrowed view of one dataset row with access by column name
///
/// All values stay as the strings found in the file; no coercion happens at
/// ingestion.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    schema: &'a RowSchema,
    record: &'a StringRecord,
}

impl<'a> RawRow<'a> {
    pub fn new(schema: &'a RowSchema, record: &'a StringRecord) -> Self {
        Self { schema, record }
    }

    /// Value of a column, `None` when the column is absent from the schema
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.schema
            .position(column)
            .and_then(|position| self.record.get(position))
    }

    /// Value of a column, empty string when absent
    pub fn get_or_empty(&self, column: &str) -> &'a str {
        self.get(column).unwrap_or("")
    }

    /// Trimmed region code of the row
    pub fn region(&self) -> &'a str {
        self.get_or_empty(columns::REGION).trim()
    }
}

/// Which column carries the status code in a given dataset
///
/// Two schema generations exist; the column is detected once per dataset and
/// passed explicitly to everything downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusField {
    /// `STATO_UI`, used by current exports
    Unit,
    /// `STATO_BUILDING`, used by older exports
    Building,
}

impl StatusField {
    /// Source column name for this variant
    pub fn column_name(self) -> &'static str {
        match self {
            StatusField::Unit => columns::STATUS_UNIT,
            StatusField::Building => columns::STATUS_BUILDING,
        }
    }

    /// Pick the status column present in a schema
    ///
    /// `STATO_UI` is preferred when both are present and assumed when neither is.
    pub fn detect(schema: &RowSchema) -> Self {
        [StatusField::Unit, StatusField::Building]
            .into_iter()
            .find(|field| schema.contains(field.column_name()))
            .unwrap_or(StatusField::Unit)
    }
}

impl std::fmt::Display for StatusField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

// =============================================================================
// Reference Data Values
// =============================================================================

/// Network node metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInfo {
    /// Display name (e.g. "POP_AO_11_VERRES")
    pub name: String,
    /// Municipality hosting the node
    pub municipality: String,
    /// WGS84 latitude
    pub latitude: f64,
    /// WGS84 longitude
    pub longitude: f64,
}

// =============================================================================
// Enriched Record
// =============================================================================

/// One accepted dataset row augmented with resolved reference data
///
/// Field order matches the workbook column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    /// Resolved municipality name (or the unknown sentinel)
    pub municipality: String,
    /// Municipality code as found in the row, trimmed
    pub municipality_code: String,
    pub parcel_id: String,
    pub address: String,
    pub house_number: String,
    pub building_id: String,
    /// Raw bearing-encoded coordinate string
    pub coordinates: String,
    /// Status code read from the detected status column, trimmed
    pub status_code: String,
    /// Node id as found in the row, trimmed
    pub node_id: String,
    pub node_name: String,
    pub node_municipality: String,
    pub node_latitude: Option<f64>,
    pub node_longitude: Option<f64>,
    pub total_units: String,
    pub last_modified: String,
    pub last_status_change: String,
}

/// A single workbook cell value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(&'a str),
    Number(f64),
    Empty,
}

impl CellValue<'_> {
    /// Rendered length in characters, used for column sizing
    pub fn display_len(&self) -> usize {
        match self {
            CellValue::Text(text) => text.chars().count(),
            CellValue::Number(value) => value.to_string().len(),
            CellValue::Empty => 0,
        }
    }
}

impl EnrichedRecord {
    /// Cell values in workbook column order
    pub fn cells(&self) -> [CellValue<'_>; REPORT_COLUMNS.len()] {
        let number = |value: Option<f64>| value.map_or(CellValue::Empty, CellValue::Number);
        [
            CellValue::Text(&self.municipality),
            CellValue::Text(&self.municipality_code),
            CellValue::Text(&self.parcel_id),
            CellValue::Text(&self.address),
            CellValue::Text(&self.house_number),
            CellValue::Text(&self.building_id),
            CellValue::Text(&self.coordinates),
            CellValue::Text(&self.status_code),
            CellValue::Text(&self.node_id),
            CellValue::Text(&self.node_name),
            CellValue::Text(&self.node_municipality),
            number(self.node_latitude),
            number(self.node_longitude),
            CellValue::Text(&self.total_units),
            CellValue::Text(&self.last_modified),
            CellValue::Text(&self.last_status_change),
        ]
    }

    /// Whether the node id resolved against the reference data
    pub fn has_node_location(&self) -> bool {
        self.node_latitude.is_some() && self.node_longitude.is_some()
    }
}

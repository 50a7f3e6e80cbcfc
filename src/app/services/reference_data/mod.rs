//! Reference data store for O(1) code-to-name lookups
//!
//! This module holds the static tables the enricher resolves against: region
//! names, municipality names, network-node metadata and status descriptions.
//! The store is built once, wrapped in an `Arc` and shared read-only for the
//! lifetime of a run. Every lookup is total: a missing key produces a
//! rendered "unknown" sentinel instead of an error.

use crate::app::models::NodeInfo;
use std::collections::HashMap;

pub mod query;
pub mod tables;

#[cfg(test)]
pub mod tests;

/// Named set of status codes offered as a ready-made filter
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPreset {
    /// Key used on the command line (e.g. "public-sites")
    pub key: String,
    /// Human description of the preset
    pub description: String,
    /// Status codes accepted by the preset
    pub codes: Vec<String>,
}

/// Immutable lookup tables for one extraction run
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// Region code -> display name
    pub(crate) regions: HashMap<String, String>,

    /// Municipality code -> display name
    pub(crate) municipalities: HashMap<String, String>,

    /// Municipality codes in insertion order
    pub(crate) municipality_order: Vec<String>,

    /// Node id -> (ordinal, metadata)
    pub(crate) nodes: HashMap<String, (usize, NodeInfo)>,

    /// Node ids in insertion order; the position is the node ordinal
    pub(crate) node_order: Vec<String>,

    /// Status code -> description
    pub(crate) statuses: HashMap<String, String>,

    /// Status codes in insertion order
    pub(crate) status_order: Vec<String>,

    /// Named filter presets
    pub(crate) presets: Vec<FilterPreset>,
}

impl ReferenceData {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the built-in tables (region 02, Valle d'Aosta)
    pub fn builtin() -> Self {
        let mut data = Self::new();
        for (code, name) in tables::REGIONS {
            data = data.with_region(code, name);
        }
        for (code, name) in tables::MUNICIPALITIES {
            data = data.with_municipality(code, name);
        }
        for (id, name, municipality, latitude, longitude) in tables::NODES {
            data = data.with_node(
                id,
                NodeInfo {
                    name: name.to_string(),
                    municipality: municipality.to_string(),
                    latitude: *latitude,
                    longitude: *longitude,
                },
            );
        }
        for (code, description) in tables::STATUSES {
            data = data.with_status(code, description);
        }
        for (key, description, codes) in tables::FILTER_PRESETS {
            let codes = codes.iter().map(|code| code.to_string()).collect();
            data = data.with_preset(key, description, codes);
        }
        let all_codes = data.status_order.clone();
        data.with_preset(
            tables::ALL_STATES_PRESET,
            "Every documented status",
            all_codes,
        )
    }

    /// Add or replace a region name
    pub fn with_region(mut self, code: &str, name: &str) -> Self {
        self.regions.insert(code.to_string(), name.to_string());
        self
    }

    /// Add or replace a municipality name
    pub fn with_municipality(mut self, code: &str, name: &str) -> Self {
        if self
            .municipalities
            .insert(code.to_string(), name.to_string())
            .is_none()
        {
            self.municipality_order.push(code.to_string());
        }
        self
    }

    /// Add or replace a network node; replacing keeps the original ordinal
    pub fn with_node(mut self, id: &str, info: NodeInfo) -> Self {
        match self.nodes.get_mut(id) {
            Some((_, existing)) => *existing = info,
            None => {
                let ordinal = self.node_order.len();
                self.nodes.insert(id.to_string(), (ordinal, info));
                self.node_order.push(id.to_string());
            }
        }
        self
    }

    /// Add or replace a status description
    pub fn with_status(mut self, code: &str, description: &str) -> Self {
        if self
            .statuses
            .insert(code.to_string(), description.to_string())
            .is_none()
        {
            self.status_order.push(code.to_string());
        }
        self
    }

    /// Add a named filter preset
    pub fn with_preset(mut self, key: &str, description: &str, codes: Vec<String>) -> Self {
        self.presets.retain(|preset| preset.key != key);
        self.presets.push(FilterPreset {
            key: key.to_string(),
            description: description.to_string(),
            codes,
        });
        self
    }

    /// Resolve a region code to its name
    pub fn resolve_region(&self, code: &str) -> String {
        self.regions
            .get(code)
            .cloned()
            .unwrap_or_else(|| format!("Region unknown ({})", code))
    }

    /// Resolve a municipality code to its name
    pub fn resolve_municipality(&self, code: &str) -> String {
        self.municipalities
            .get(code)
            .cloned()
            .unwrap_or_else(|| format!("Municipality unknown ({})", code))
    }

    /// Resolve a node id to its metadata (O(1) lookup)
    pub fn resolve_node(&self, id: &str) -> Option<&NodeInfo> {
        self.nodes.get(id).map(|(_, info)| info)
    }

    /// Resolve a status code to its description
    pub fn resolve_status(&self, code: &str) -> String {
        self.statuses
            .get(code)
            .cloned()
            .unwrap_or_else(|| format!("Status unknown ({})", code))
    }

    /// Check if a municipality code is known
    pub fn contains_municipality(&self, code: &str) -> bool {
        self.municipalities.contains_key(code)
    }

    /// Check if a status code is documented
    pub fn contains_status(&self, code: &str) -> bool {
        self.statuses.contains_key(code)
    }

    /// Position of a node in insertion order
    pub fn node_ordinal(&self, id: &str) -> Option<usize> {
        self.nodes.get(id).map(|(ordinal, _)| *ordinal)
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn municipality_count(&self) -> usize {
        self.municipalities.len()
    }

    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    pub fn status_count(&self) -> usize {
        self.statuses.len()
    }
}

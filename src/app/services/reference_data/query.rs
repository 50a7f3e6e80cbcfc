//! Reference table listing and search
//!
//! Ordered views over the store used by the `reference` command and by the
//! geo exporter, which needs nodes in their stable insertion order.

use super::{FilterPreset, ReferenceData};
use crate::app::models::NodeInfo;

impl ReferenceData {
    /// All regions as (code, name), sorted by code
    pub fn regions(&self) -> Vec<(&str, &str)> {
        let mut regions: Vec<(&str, &str)> = self
            .regions
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
            .collect();
        regions.sort_unstable_by(|a, b| a.0.cmp(b.0));
        regions
    }

    /// All municipalities as (code, name) in insertion order
    pub fn municipalities(&self) -> Vec<(&str, &str)> {
        self.municipality_order
            .iter()
            .filter_map(|code| {
                self.municipalities
                    .get(code)
                    .map(|name| (code.as_str(), name.as_str()))
            })
            .collect()
    }

    /// Find municipalities by name pattern (case-insensitive)
    ///
    /// # Examples
    /// ```
    /// # use coverage_extractor::ReferenceData;
    /// let reference = ReferenceData::builtin();
    /// let matches = reference.find_municipalities_by_name("gressoney");
    /// assert_eq!(matches.len(), 2);
    /// ```
    pub fn find_municipalities_by_name(&self, pattern: &str) -> Vec<(&str, &str)> {
        let pattern_lower = pattern.to_lowercase();
        self.municipalities()
            .into_iter()
            .filter(|(_, name)| name.to_lowercase().contains(&pattern_lower))
            .collect()
    }

    /// Node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.node_order.iter().map(String::as_str)
    }

    /// All nodes as (id, metadata) in insertion order
    pub fn nodes(&self) -> Vec<(&str, &NodeInfo)> {
        self.node_order
            .iter()
            .filter_map(|id| self.resolve_node(id).map(|info| (id.as_str(), info)))
            .collect()
    }

    /// All statuses as (code, description) in insertion order
    pub fn statuses(&self) -> Vec<(&str, &str)> {
        self.status_order
            .iter()
            .filter_map(|code| {
                self.statuses
                    .get(code)
                    .map(|description| (code.as_str(), description.as_str()))
            })
            .collect()
    }

    /// Look up a filter preset by key
    pub fn preset(&self, key: &str) -> Option<&FilterPreset> {
        self.presets.iter().find(|preset| preset.key == key)
    }

    /// All filter presets in definition order
    pub fn presets(&self) -> &[FilterPreset] {
        &self.presets
    }
}

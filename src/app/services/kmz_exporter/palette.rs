//! Node style assignment
//!
//! Each node in the reference data owns a style pair (node marker and site
//! marker) numbered by its ordinal. Colors cycle through the palette, so
//! nodes further apart than the palette size share a color.

use super::document::MarkerStyle;
use crate::app::services::reference_data::ReferenceData;
use crate::constants::{
    LABEL_SCALE, NODE_ICON_HREF, NODE_ICON_SCALE, NODE_PALETTE, SITE_ICON_HREF, SITE_ICON_SCALE,
};

/// Style lookup for one reference data store
#[derive(Debug, Clone, Copy)]
pub struct StylePalette<'a> {
    reference: &'a ReferenceData,
}

impl<'a> StylePalette<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Style index of a node; unknown nodes fall back to the first style
    pub fn style_index(&self, node_id: &str) -> usize {
        self.reference.node_ordinal(node_id).unwrap_or(0)
    }

    pub fn color(&self, node_id: &str) -> &'static str {
        color_for_index(self.style_index(node_id))
    }

    pub fn node_style_id(&self, node_id: &str) -> String {
        node_style_id(self.style_index(node_id))
    }

    pub fn site_style_id(&self, node_id: &str) -> String {
        site_style_id(self.style_index(node_id))
    }

    /// Every style pair in node order
    ///
    /// A store without nodes still yields the first pair so fallback
    /// references resolve.
    pub fn styles(&self) -> Vec<MarkerStyle> {
        let count = self.reference.node_count().max(1);
        let mut styles = Vec::with_capacity(count * 2);
        for index in 0..count {
            let color = color_for_index(index).to_string();
            styles.push(MarkerStyle {
                id: node_style_id(index),
                color: color.clone(),
                icon_href: NODE_ICON_HREF,
                icon_scale: NODE_ICON_SCALE,
                label_scale: LABEL_SCALE,
            });
            styles.push(MarkerStyle {
                id: site_style_id(index),
                color,
                icon_href: SITE_ICON_HREF,
                icon_scale: SITE_ICON_SCALE,
                label_scale: LABEL_SCALE,
            });
        }
        styles
    }
}

pub fn color_for_index(index: usize) -> &'static str {
    NODE_PALETTE[index % NODE_PALETTE.len()]
}

pub fn node_style_id(index: usize) -> String {
    format!("node_style_{}", index)
}

pub fn site_style_id(index: usize) -> String {
    format!("site_style_{}", index)
}

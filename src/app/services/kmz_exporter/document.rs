//! Geo document model

use crate::app::services::coordinate_parser::GeoPoint;

/// Icon and label style shared by a group of markers
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub id: String,
    /// KML `aabbggrr` color
    pub color: String,
    pub icon_href: &'static str,
    pub icon_scale: &'static str,
    pub label_scale: &'static str,
}

/// A single map marker
#[derive(Debug, Clone, PartialEq)]
pub struct Placemark {
    pub name: String,
    /// HTML fragment shown in the marker balloon
    pub description: String,
    pub style_id: String,
    pub point: GeoPoint,
}

/// A named folder of markers and sub-folders
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Folder {
    pub name: String,
    /// Whether viewers show the folder expanded
    pub open: bool,
    pub placemarks: Vec<Placemark>,
    pub folders: Vec<Folder>,
}

impl Folder {
    pub fn new(name: impl Into<String>, open: bool) -> Self {
        Self {
            name: name.into(),
            open,
            ..Default::default()
        }
    }

    /// Markers in this folder and all sub-folders
    pub fn placemark_count(&self) -> usize {
        self.placemarks.len()
            + self
                .folders
                .iter()
                .map(Folder::placemark_count)
                .sum::<usize>()
    }
}

/// Root of a KML document
#[derive(Debug, Clone, PartialEq)]
pub struct GeoDocument {
    pub name: String,
    pub description: String,
    pub styles: Vec<MarkerStyle>,
    pub root: Folder,
}

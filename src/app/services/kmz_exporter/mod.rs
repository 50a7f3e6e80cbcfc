//! KMZ export of public-administration sites
//!
//! Accepted records with the public-site status are turned into a marker tree
//! for map viewers: one folder of network-node markers and one folder per
//! municipality holding the site markers. Every node gets a style pair whose
//! color comes from a fixed palette, cycled by the node's position in the
//! reference data. The KML document is stored as `doc.kml` inside a
//! deflate-compressed zip archive.
//!
//! - [`document`]: in-memory document, folder and marker model
//! - [`palette`]: node-to-style assignment
//! - [`kml`]: KML serialization
//! - [`archive`]: KMZ packaging
//! - [`exporter`]: record selection and document assembly

pub mod archive;
pub mod document;
pub mod exporter;
pub mod kml;
pub mod palette;

#[cfg(test)]
pub mod tests;

pub use document::{Folder, GeoDocument, MarkerStyle, Placemark};
pub use exporter::{GeoExportOptions, KmzExporter, KmzStats, SiteSelection};
pub use palette::StylePalette;

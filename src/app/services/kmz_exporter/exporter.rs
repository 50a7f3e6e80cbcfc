//! Geo document assembly from enriched records

use super::archive::stage_kmz;
use super::document::{Folder, GeoDocument, Placemark};
use super::kml::to_kml;
use super::palette::StylePalette;
use crate::app::models::EnrichedRecord;
use crate::app::services::coordinate_parser::{GeoPoint, parse_coordinates};
use crate::app::services::extractor::{NullSink, ProgressSink, Reporter};
use crate::app::services::reference_data::ReferenceData;
use crate::app::services::staged_file::StagedFile;
use crate::constants::{DEFAULT_TARGET_REGION, PUBLIC_SITE_STATUS, RUN_DATE_FORMAT};
use crate::{Error, Result};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Whether the records handed to the exporter still need the public-site filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteSelection {
    /// Every record is already a public site
    AlreadyFiltered,
    /// Keep only records with the public-site status
    FilterPublicSites,
}

/// Document-level settings
#[derive(Debug, Clone)]
pub struct GeoExportOptions {
    pub selection: SiteSelection,
    /// Region code used in the document title
    pub region: String,
    /// Timestamp shown in the document name and description
    pub generated_at: NaiveDateTime,
}

impl Default for GeoExportOptions {
    fn default() -> Self {
        Self {
            selection: SiteSelection::FilterPublicSites,
            region: DEFAULT_TARGET_REGION.to_string(),
            generated_at: Local::now().naive_local(),
        }
    }
}

/// Outcome of one KMZ export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KmzStats {
    pub path: PathBuf,
    /// Records that passed the public-site selection
    pub sites_selected: usize,
    pub site_markers: usize,
    pub node_markers: usize,
    pub municipality_folders: usize,
    /// Sites dropped because their coordinates could not be parsed
    pub invalid_coordinates: usize,
    pub file_size: u64,
}

/// Builds and writes the public-site KMZ
pub struct KmzExporter<'a> {
    reference: &'a ReferenceData,
    sink: &'a dyn ProgressSink,
}

impl<'a> KmzExporter<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self {
            reference,
            sink: &NullSink,
        }
    }

    pub fn with_sink(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.sink = sink;
        self
    }

    /// Build the document and write it to `output_path`
    ///
    /// Returns [`Error::NothingToExport`] without touching the filesystem
    /// when no record qualifies. An abandoned caller gets
    /// [`Error::ProcessingInterrupted`] and nothing is moved into place.
    pub fn generate(
        &self,
        records: &[EnrichedRecord],
        output_path: &Path,
        options: &GeoExportOptions,
    ) -> Result<KmzStats> {
        let (staged, stats) = self.stage(records, output_path, options)?;
        if self.sink.is_abandoned() {
            return Err(Error::processing_interrupted(
                "KMZ discarded, caller abandoned the job",
            ));
        }
        staged.commit()?;
        Ok(stats)
    }

    /// Build the document and write the archive into a staged file
    pub fn stage(
        &self,
        records: &[EnrichedRecord],
        output_path: &Path,
        options: &GeoExportOptions,
    ) -> Result<(StagedFile, KmzStats)> {
        let reporter = Reporter::new(self.sink);

        let sites = select_sites(records, options.selection);
        if sites.is_empty() {
            reporter.warn(format!(
                "No records with status {}; KMZ not written",
                PUBLIC_SITE_STATUS
            ));
            return Err(Error::nothing_to_export(PUBLIC_SITE_STATUS));
        }
        reporter.info(format!("{} public site(s) selected for KMZ", sites.len()));
        reporter.progress(10.0, "Building geo document");

        let (document, built) = self.build_document(&sites, options, &reporter);
        reporter.progress(70.0, "Serializing KML");

        let kml = to_kml(&document)
            .map_err(|e| Error::geo_export(output_path.display().to_string(), e.to_string()))?;
        let staged = stage_kmz(output_path, &kml)?;

        reporter.info(format!(
            "KMZ ready: {} ({} site marker(s), {} node marker(s))",
            output_path.display(),
            built.site_markers,
            built.node_markers
        ));
        reporter.progress(100.0, "KMZ built");

        let stats = KmzStats {
            path: output_path.to_path_buf(),
            sites_selected: sites.len(),
            site_markers: built.site_markers,
            node_markers: built.node_markers,
            municipality_folders: built.municipality_folders,
            invalid_coordinates: built.invalid_coordinates,
            file_size: staged.size(),
        };
        Ok((staged, stats))
    }

    /// Assemble the in-memory document for already selected sites
    pub fn build_document(
        &self,
        sites: &[&EnrichedRecord],
        options: &GeoExportOptions,
        reporter: &Reporter<'_>,
    ) -> (GeoDocument, BuildCounts) {
        let palette = StylePalette::new(self.reference);
        let region_name = self.reference.resolve_region(&options.region);
        let name = format!(
            "PAC/PAL sites {} {}",
            region_name,
            options.generated_at.format(RUN_DATE_FORMAT)
        );
        let description = format!(
            "PAC/PAL sites {} - generated {}\ncoverage_extractor v{}",
            region_name,
            options.generated_at.format("%d/%m/%Y %H:%M"),
            env!("CARGO_PKG_VERSION")
        );

        let mut counts = BuildCounts::default();
        let mut root = Folder::new(name.clone(), true);

        let node_folder = self.node_folder(sites, &palette, reporter);
        counts.node_markers = node_folder.placemarks.len();
        root.folders.push(node_folder);

        let mut by_municipality: BTreeMap<&str, Vec<&EnrichedRecord>> = BTreeMap::new();
        for &site in sites {
            by_municipality
                .entry(site.municipality.as_str())
                .or_default()
                .push(site);
        }

        for (municipality, group) in by_municipality {
            let mut folder = Folder::new(municipality, false);
            for site in group {
                let Some(point) = parse_coordinates(Some(site.coordinates.as_str())) else {
                    reporter.warn(format!(
                        "Invalid coordinates for building {}: '{}'",
                        site.building_id, site.coordinates
                    ));
                    counts.invalid_coordinates += 1;
                    continue;
                };
                folder.placemarks.push(Placemark {
                    name: site.building_id.clone(),
                    description: site_description(site),
                    style_id: palette.site_style_id(&site.node_id),
                    point,
                });
            }

            if folder.placemarks.is_empty() {
                continue;
            }
            reporter.debug(format!(
                "Municipality {}: {} site(s)",
                municipality,
                folder.placemarks.len()
            ));
            counts.site_markers += folder.placemarks.len();
            counts.municipality_folders += 1;
            root.folders.push(folder);
        }

        let document = GeoDocument {
            name,
            description,
            styles: palette.styles(),
            root,
        };
        (document, counts)
    }

    /// One marker per distinct known node, first occurrence first
    fn node_folder(
        &self,
        sites: &[&EnrichedRecord],
        palette: &StylePalette<'_>,
        reporter: &Reporter<'_>,
    ) -> Folder {
        let mut folder = Folder::new("Network nodes", true);
        let mut seen: HashSet<&str> = HashSet::new();

        for site in sites {
            let node_id = site.node_id.as_str();
            if !seen.insert(node_id) {
                continue;
            }
            let Some(node) = self.reference.resolve_node(node_id) else {
                continue;
            };

            folder.placemarks.push(Placemark {
                name: node.name.clone(),
                description: format!(
                    "<b>Node:</b> {}<br/><b>ID:</b> {}<br/><b>Municipality:</b> {}<br/><b>Coordinates:</b> {:.6}, {:.6}",
                    node.name, node_id, node.municipality, node.latitude, node.longitude
                ),
                style_id: palette.node_style_id(node_id),
                point: GeoPoint::new(node.longitude, node.latitude),
            });
            reporter.debug(format!("Node marker added: {}", node.name));
        }

        folder
    }
}

/// Marker and folder counts of a built document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildCounts {
    pub site_markers: usize,
    pub node_markers: usize,
    pub municipality_folders: usize,
    pub invalid_coordinates: usize,
}

/// Apply the site selection, keeping record order
pub fn select_sites(records: &[EnrichedRecord], selection: SiteSelection) -> Vec<&EnrichedRecord> {
    match selection {
        SiteSelection::AlreadyFiltered => records.iter().collect(),
        SiteSelection::FilterPublicSites => records
            .iter()
            .filter(|record| record.status_code.trim() == PUBLIC_SITE_STATUS)
            .collect(),
    }
}

fn site_description(site: &EnrichedRecord) -> String {
    format!(
        "<b>PAC/PAL site</b><br/><b>Building ID:</b> {}<br/><b>Address:</b> {} {}<br/><b>Municipality:</b> {}<br/><b>Node:</b> {}<br/><b>ISTAT:</b> {}<br/><b>Coordinates:</b> {}",
        site.building_id,
        site.address,
        site.house_number,
        site.municipality,
        site.node_name,
        site.municipality_code,
        site.coordinates
    )
}

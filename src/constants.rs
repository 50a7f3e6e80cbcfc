//! Application constants for the coverage extractor
//!
//! This module contains the dataset schema, default values, processing limits
//! and output styling constants used throughout the extractor.

// =============================================================================
// Dataset Schema
// =============================================================================

/// Column separator used by the coverage dataset
pub const CSV_DELIMITER: u8 = b'|';

/// Dataset columns in their published order
pub const CSV_COLUMNS: &[&str] = &[
    "ID_SCALA",
    "REGIONE",
    "PROVINCIA",
    "COMUNE",
    "FRAZIONE",
    "PARTICELLA_TOP",
    "INDIRIZZO",
    "CIVICO",
    "SCALA_PALAZZINA",
    "CODICE_VIA",
    "ID_BUILDING",
    "COORDINATE_BUILDING",
    "POP",
    "TOTALE_UI",
    "STATO_UI",
    "STATO_SCALA_PALAZZINA",
    "DATA_RFC_INDICATIVA",
    "DATA_RFC_EFFETTIVA",
    "DATA_RFA_INDICATIVA",
    "DATA_RFA_EFFETTIVA",
    "DATA_ULTIMA_MODIFICA_RECORD",
    "DATA_ULTIMA_VARIAZIONE_STATO_BUILDING",
    "DATA_ULTIMA_VARIAZIONE_STATO_SCALA_PALAZZINA",
    "ID_EGON_CIVICO",
    "ID_EGON_STRADA",
];

/// Source column names read by the enricher
pub mod columns {
    pub const REGION: &str = "REGIONE";
    pub const MUNICIPALITY: &str = "COMUNE";
    pub const PARCEL: &str = "PARTICELLA_TOP";
    pub const ADDRESS: &str = "INDIRIZZO";
    pub const HOUSE_NUMBER: &str = "CIVICO";
    pub const BUILDING_ID: &str = "ID_BUILDING";
    pub const COORDINATES: &str = "COORDINATE_BUILDING";
    pub const NODE: &str = "POP";
    pub const TOTAL_UNITS: &str = "TOTALE_UI";
    pub const LAST_MODIFIED: &str = "DATA_ULTIMA_MODIFICA_RECORD";
    pub const LAST_STATUS_CHANGE: &str = "DATA_ULTIMA_VARIAZIONE_STATO_BUILDING";

    /// Status column name in current schema versions
    pub const STATUS_UNIT: &str = "STATO_UI";

    /// Status column name in older schema versions
    pub const STATUS_BUILDING: &str = "STATO_BUILDING";
}

/// Workbook column headers, in enriched record order
pub const REPORT_COLUMNS: [&str; 16] = [
    "COMUNE",
    "ISTAT",
    "PARTICELLA_TOP",
    "INDIRIZZO",
    "CIVICO",
    "ID_BUILDING",
    "COORDINATE_BUILDING",
    "STATO_UI",
    "POP",
    "NOME_PCN",
    "COMUNE_PCN",
    "LAT_PCN",
    "LON_PCN",
    "TOTALE_UI",
    "DATA_ULTIMA_MODIFICA_RECORD",
    "DATA_ULTIMA_VARIAZIONE_STATO_BUILDING",
];

// =============================================================================
// Processing Defaults
// =============================================================================

/// Default region to extract (Valle d'Aosta)
pub const DEFAULT_TARGET_REGION: &str = "02";

/// Default rows per read batch
pub const DEFAULT_CHUNK_SIZE: usize = 5_000;

/// Upper bound accepted for the batch size
pub const MAX_CHUNK_SIZE: usize = 1_000_000;

/// Default dataset location
pub const DEFAULT_INPUT_PATH: &str = "data/dbcopertura_CD.csv";

/// Default report location (a run-date suffix is appended)
pub const DEFAULT_OUTPUT_PATH: &str = "output/coverage_extract.xlsx";

/// Emit a scan checkpoint every N chunks
pub const PROGRESS_CHUNK_INTERVAL: u64 = 10;

/// Emit an extraction checkpoint every N accepted records
pub const PROGRESS_RECORD_INTERVAL: usize = 1_000;

/// Emit a workbook checkpoint every N sheets
pub const PROGRESS_SHEET_INTERVAL: usize = 10;

/// Date format used for the output file suffix
pub const RUN_DATE_FORMAT: &str = "%Y%m%d";

/// Overall job progress allotted to each phase (percent)
pub mod phases {
    pub const EXTRACTION_END: f64 = 70.0;
    pub const REPORT_END: f64 = 95.0;
    pub const GEO_END: f64 = 100.0;
}

// =============================================================================
// Report Layout
// =============================================================================

/// Maximum sheet name length accepted by spreadsheet applications
pub const SHEET_NAME_MAX_LEN: usize = 31;

/// Column width bounds in character units
pub const MIN_COLUMN_WIDTH: usize = 10;
pub const MAX_COLUMN_WIDTH: usize = 50;

/// Padding added to the longest cell when sizing a column
pub const COLUMN_WIDTH_PADDING: usize = 2;

// =============================================================================
// Geo Export
// =============================================================================

/// Status code of public-administration sites exported to KMZ
pub const PUBLIC_SITE_STATUS: &str = "302";

/// Suffix appended to the report stem for the KMZ file name
pub const KMZ_FILE_SUFFIX: &str = "_PAC_PAL";

/// Name of the KML entry inside the KMZ archive
pub const KML_ENTRY_NAME: &str = "doc.kml";

/// KML namespace
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Marker icons
pub const SITE_ICON_HREF: &str = "http://maps.google.com/mapfiles/kml/pal2/icon26.png";
pub const NODE_ICON_HREF: &str = "http://maps.google.com/mapfiles/kml/shapes/phone.png";

/// Icon and label scales
pub const SITE_ICON_SCALE: &str = "1.0";
pub const NODE_ICON_SCALE: &str = "1.2";
pub const LABEL_SCALE: &str = "0.8";

/// Node colors in KML `aabbggrr` notation, assigned cyclically
pub const NODE_PALETTE: &[&str] = &[
    "ff0000ff", // red
    "ff00ff00", // green
    "ffff0000", // blue
    "ff00ffff", // yellow
    "ffff00ff", // magenta
    "ffffff00", // cyan
    "ff8000ff",
    "ff0080ff",
    "ff8080ff",
    "ff0080c0",
    "ff8040ff",
    "ff4080ff",
    "ff00c080",
    "ffc08000",
    "ff8000c0",
    "ff40c0ff",
    "ffc040ff",
    "ff4040c0",
    "ff80c040",
    "ff404080",
];

// =============================================================================
// Configuration
// =============================================================================

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "coverage-extractor";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overrides
pub mod env_vars {
    pub const INPUT: &str = "COVERAGE_EXTRACTOR_INPUT";
    pub const OUTPUT: &str = "COVERAGE_EXTRACTOR_OUTPUT";
    pub const CHUNK_SIZE: &str = "COVERAGE_EXTRACTOR_CHUNK_SIZE";
    pub const REGION: &str = "COVERAGE_EXTRACTOR_REGION";
}

/// Bounded capacity of the progress channel used by the CLI
pub const PROGRESS_CHANNEL_CAPACITY: usize = 256;

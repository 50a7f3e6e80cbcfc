//! Coverage Extractor Library
//!
//! A Rust library for pulling a single region out of a large pipe-delimited
//! coverage dataset and turning it into human-readable deliverables.
//!
//! This library provides tools for:
//! - Streaming the dataset in bounded chunks and locating the contiguous block
//!   of rows that belongs to the target region
//! - Enriching each row with municipality and network-node reference data
//! - Filtering rows by status code (explicit sets or named presets)
//! - Writing a multi-sheet workbook with one sheet per municipality
//! - Exporting public-site markers to a KMZ archive for map viewers
//! - Reporting progress to an injected sink without tying the core to any UI

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod coordinate_parser;
        pub mod extractor;
        pub mod kmz_exporter;
        pub mod pipeline;
        pub mod record_enricher;
        pub mod reference_data;
        pub mod report_writer;
        pub mod staged_file;
        pub mod status_filter;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{EnrichedRecord, StatusField};
pub use app::services::reference_data::ReferenceData;
pub use config::Config;

/// Result type alias for the coverage extractor
pub type Result<T> = std::result::Result<T, Error>;

/// Broad failure buckets callers can branch on when presenting errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The input dataset does not exist
    InputNotFound,
    /// The input could not be read or parsed
    ReadFailure,
    /// The scan completed but produced nothing to report
    NoMatch,
    /// A report or geo document could not be written
    OutputWrite,
    /// Invalid configuration or arguments
    Configuration,
    /// The run was abandoned by the caller
    Interrupted,
}

/// Error types for extraction, reporting and export operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input dataset is missing
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    /// CSV reading error
    #[error("CSV read error in file '{file}': {message}")]
    CsvRead {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Dataset structure is not what the extractor expects
    #[error("Invalid dataset format in file '{file}': {message}")]
    InvalidFormat { file: String, message: String },

    /// The target region never appeared in the dataset
    #[error("No rows for region {region} found after scanning {rows_scanned} rows")]
    NoRegionData { region: String, rows_scanned: u64 },

    /// The target region was found but the filter rejected every row
    #[error("Region {region} found but no rows passed the status filter ({filtered_out} rejected)")]
    NoRecordsAccepted { region: String, filtered_out: u64 },

    /// Workbook generation failed
    #[error("Report writing error for '{path}': {message}")]
    ReportWrite {
        path: String,
        message: String,
        #[source]
        source: Option<rust_xlsxwriter::XlsxError>,
    },

    /// KMZ generation failed
    #[error("Geo export error for '{path}': {message}")]
    GeoExport { path: String, message: String },

    /// No record qualified for the geo export
    #[error("Nothing to export: no records with status {status_code}")]
    NothingToExport { status_code: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an input-not-found error
    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create a CSV read error with context
    pub fn csv_read(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvRead {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a no-region-data error
    pub fn no_region_data(region: impl Into<String>, rows_scanned: u64) -> Self {
        Self::NoRegionData {
            region: region.into(),
            rows_scanned,
        }
    }

    /// Create a no-records-accepted error
    pub fn no_records_accepted(region: impl Into<String>, filtered_out: u64) -> Self {
        Self::NoRecordsAccepted {
            region: region.into(),
            filtered_out,
        }
    }

    /// Create a report writing error
    pub fn report_write(
        path: impl Into<String>,
        message: impl Into<String>,
        source: Option<rust_xlsxwriter::XlsxError>,
    ) -> Self {
        Self::ReportWrite {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a geo export error
    pub fn geo_export(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GeoExport {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a nothing-to-export error
    pub fn nothing_to_export(status_code: impl Into<String>) -> Self {
        Self::NothingToExport {
            status_code: status_code.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Classify the error into one of the caller-facing buckets
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputNotFound { .. } => ErrorCategory::InputNotFound,
            Self::CsvRead { .. } | Self::InvalidFormat { .. } => ErrorCategory::ReadFailure,
            Self::NoRegionData { .. }
            | Self::NoRecordsAccepted { .. }
            | Self::NothingToExport { .. } => ErrorCategory::NoMatch,
            Self::ReportWrite { .. } | Self::GeoExport { .. } | Self::Io { .. } => {
                ErrorCategory::OutputWrite
            }
            Self::Configuration { .. } | Self::DataValidation { .. } => {
                ErrorCategory::Configuration
            }
            Self::ProcessingInterrupted { .. } => ErrorCategory::Interrupted,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvRead {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

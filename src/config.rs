//! Configuration management and validation.
//!
//! Settings are resolved in layers: built-in defaults, then an optional JSON
//! file, then environment variables. Command-line overrides are applied last
//! by the CLI through the `with_*` builders.

use crate::app::services::pipeline::ExtractionJob;
use crate::app::services::reference_data::ReferenceData;
use crate::app::services::status_filter::StatusFilter;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CHUNK_SIZE, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH,
    DEFAULT_TARGET_REGION, MAX_CHUNK_SIZE, env_vars,
};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Named batch sizes for common memory budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkProfile {
    /// 5K rows per batch
    LowMemory,
    /// 10K rows per batch
    Balanced,
    /// 25K rows per batch
    HighPerformance,
    /// 50K rows per batch
    Maximum,
}

impl ChunkProfile {
    pub fn chunk_size(self) -> usize {
        match self {
            ChunkProfile::LowMemory => 5_000,
            ChunkProfile::Balanced => 10_000,
            ChunkProfile::HighPerformance => 25_000,
            ChunkProfile::Maximum => 50_000,
        }
    }
}

/// Input, region and filtering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Pipe-delimited coverage dataset
    pub input_path: PathBuf,

    /// Two-digit region code to extract
    pub target_region: String,

    /// Rows per read batch
    pub chunk_size: usize,

    /// Explicit status codes; empty means no filter
    pub status_codes: Vec<String>,

    /// Named status preset, exclusive with `status_codes`
    pub preset: Option<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            target_region: DEFAULT_TARGET_REGION.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            status_codes: Vec::new(),
            preset: None,
        }
    }
}

/// Deliverable settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Requested workbook path; the run date is appended to the file name
    pub report_path: PathBuf,

    /// Also write the public-site KMZ
    pub export_kmz: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            report_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            export_kmz: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when neither `RUST_LOG` nor `-v`/`-q` say otherwise
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete extractor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Location of the per-user configuration file, if the platform has one
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a JSON configuration file; missing sections take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config {}", path.display()), e))?;
        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Defaults, then a JSON file, then environment variables
    ///
    /// An explicit path must exist. Without one, the per-user file is read
    /// only when present.
    pub fn load_layered(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => match Self::default_config_path().filter(|path| path.is_file()) {
                Some(path) => {
                    debug!("Loading configuration from {}", path.display());
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(input) = lookup(env_vars::INPUT) {
            self.extraction.input_path = PathBuf::from(input);
        }
        if let Some(output) = lookup(env_vars::OUTPUT) {
            self.output.report_path = PathBuf::from(output);
        }
        if let Some(region) = lookup(env_vars::REGION) {
            self.extraction.target_region = region.trim().to_string();
        }
        if let Some(chunk_size) = lookup(env_vars::CHUNK_SIZE) {
            self.extraction.chunk_size = chunk_size.trim().parse().map_err(|_| {
                Error::configuration(format!(
                    "{} must be a positive integer, got '{}'",
                    env_vars::CHUNK_SIZE,
                    chunk_size
                ))
            })?;
        }
        Ok(())
    }

    /// Check value ranges and formats
    pub fn validate(&self) -> Result<()> {
        let chunk_size = self.extraction.chunk_size;
        if !(1..=MAX_CHUNK_SIZE).contains(&chunk_size) {
            return Err(Error::configuration(format!(
                "Chunk size must be between 1 and {}, got {}",
                MAX_CHUNK_SIZE, chunk_size
            )));
        }

        let region = &self.extraction.target_region;
        if region.len() != 2 || !region.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::configuration(format!(
                "Region code must be exactly two digits, got '{}'",
                region
            )));
        }

        if self.output.report_path.file_name().is_none() {
            return Err(Error::configuration(format!(
                "Output path has no file name: {}",
                self.output.report_path.display()
            )));
        }

        if self.extraction.preset.is_some() && !self.extraction.status_codes.is_empty() {
            return Err(Error::configuration(
                "Use either explicit status codes or a preset, not both",
            ));
        }

        Ok(())
    }

    /// Resolve the configured filter against the reference tables
    pub fn status_filter(&self, reference: &ReferenceData) -> Result<StatusFilter> {
        match &self.extraction.preset {
            Some(key) => StatusFilter::from_preset(reference, key),
            None => Ok(StatusFilter::from_codes(&self.extraction.status_codes)),
        }
    }

    /// Validate and turn the configuration into a runnable job
    pub fn to_job(&self, reference: &ReferenceData, run_at: NaiveDateTime) -> Result<ExtractionJob> {
        self.validate()?;
        Ok(ExtractionJob {
            input_path: self.extraction.input_path.clone(),
            report_path: self.output.report_path.clone(),
            chunk_size: self.extraction.chunk_size,
            target_region: self.extraction.target_region.clone(),
            filter: self.status_filter(reference)?,
            export_kmz: self.output.export_kmz,
            run_at,
        })
    }

    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.extraction.input_path = path.into();
        self
    }

    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.report_path = path.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.extraction.target_region = region.into();
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.extraction.chunk_size = chunk_size;
        self
    }

    pub fn with_profile(mut self, profile: ChunkProfile) -> Self {
        self.extraction.chunk_size = profile.chunk_size();
        self
    }

    /// Replace the filter with explicit codes, clearing any preset
    pub fn with_status_codes(mut self, codes: Vec<String>) -> Self {
        self.extraction.status_codes = codes;
        self.extraction.preset = None;
        self
    }

    /// Replace the filter with a preset, clearing explicit codes
    pub fn with_preset(mut self, key: impl Into<String>) -> Self {
        self.extraction.preset = Some(key.into());
        self.extraction.status_codes.clear();
        self
    }

    pub fn with_kmz_export(mut self, enabled: bool) -> Self {
        self.output.export_kmz = enabled;
        self
    }
}

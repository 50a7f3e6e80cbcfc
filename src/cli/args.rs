//! Command-line argument definitions for the coverage extractor
//!
//! This module defines the CLI interface using the clap derive API. Values
//! given here override the layered configuration.

use crate::config::{ChunkProfile, Config};
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the coverage extractor
///
/// Pulls one region out of the pipe-delimited coverage dataset and writes a
/// per-municipality workbook, optionally with a KMZ of public sites.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "coverage_extractor",
    version,
    about = "Extract one region from the coverage dataset into a per-municipality workbook",
    long_about = "Streams the pipe-delimited coverage dataset in bounded chunks, locates the \
                  contiguous block of rows for one region, enriches every row with municipality \
                  and network-node names, and writes one workbook sheet per municipality. \
                  Public-administration sites can also be exported as a KMZ map."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Extract a region into a workbook (and optionally a KMZ)
    Extract(ExtractArgs),
    /// Print the built-in reference tables
    Reference(ReferenceArgs),
}

/// Arguments for the extract command
#[derive(Debug, Clone, Default, Parser)]
pub struct ExtractArgs {
    /// Pipe-delimited coverage dataset
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input_path: Option<PathBuf>,

    /// Workbook path; the run date is appended to the file name
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Rows per read batch
    #[arg(long = "chunk-size", value_name = "ROWS", conflicts_with = "profile")]
    pub chunk_size: Option<usize>,

    /// Named batch size
    #[arg(long = "profile", value_enum, value_name = "PROFILE")]
    pub profile: Option<ChunkProfile>,

    /// Two-digit region code
    #[arg(long = "region", value_name = "CODE")]
    pub region: Option<String>,

    /// Comma-separated status codes to keep (e.g. 102,302)
    #[arg(long = "status", value_name = "LIST", conflicts_with = "preset")]
    pub status: Option<StatusList>,

    /// Named status preset (see `reference presets`)
    #[arg(long = "preset", value_name = "KEY")]
    pub preset: Option<String>,

    /// Also export public-administration sites as KMZ
    #[arg(long = "kmz")]
    pub kmz: bool,

    /// JSON configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: debug, -vv: trace)"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the run summary"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the reference command
#[derive(Debug, Clone, Parser)]
pub struct ReferenceArgs {
    #[command(subcommand)]
    pub table: ReferenceTable,

    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        global = true,
        help = "Output format for the table"
    )]
    pub output_format: OutputFormat,
}

/// Reference tables that can be printed
#[derive(Debug, Clone, Subcommand)]
pub enum ReferenceTable {
    /// Region codes and names
    Regions,
    /// Municipality codes and names
    Municipalities {
        /// Case-insensitive name fragment
        #[arg(long = "search", value_name = "TEXT")]
        search: Option<String>,
    },
    /// Network nodes with their location
    Nodes,
    /// Status codes and descriptions
    Statuses,
    /// Named status filter presets
    Presets,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Parsed `--status` value
#[derive(Debug, Clone, PartialEq)]
pub struct StatusList {
    pub codes: Vec<String>,
}

impl FromStr for StatusList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let codes: Vec<String> = s
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if codes.is_empty() {
            return Err(Error::data_validation("Status list cannot be empty"));
        }

        Ok(StatusList { codes })
    }
}

impl ExtractArgs {
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.is_file() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }

    /// Log level from `-v`/`-q`, falling back to the configured one
    pub fn get_log_level(&self, configured: &str) -> String {
        if self.quiet {
            return "error".to_string();
        }
        match self.verbose {
            0 => configured.to_string(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }

    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }

    /// Layer command-line values over a loaded configuration
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(path) = &self.input_path {
            config = config.with_input_path(path);
        }
        if let Some(path) = &self.output_path {
            config = config.with_report_path(path);
        }
        if let Some(profile) = self.profile {
            config = config.with_profile(profile);
        }
        if let Some(chunk_size) = self.chunk_size {
            config = config.with_chunk_size(chunk_size);
        }
        if let Some(region) = &self.region {
            config = config.with_region(region.trim());
        }
        if let Some(status) = &self.status {
            config = config.with_status_codes(status.codes.clone());
        }
        if let Some(preset) = &self.preset {
            config = config.with_preset(preset.trim());
        }
        if self.kmz {
            config = config.with_kmz_export(true);
        }
        config
    }
}

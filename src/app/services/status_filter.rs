//! Status-code filtering
//!
//! A filter is either absent (accept every in-region row) or a finite set of
//! status codes matched exactly against the trimmed status of each row.
//! Codes missing from the status table are still valid filter values; they
//! simply match nothing unless a row carries them.

use crate::app::services::reference_data::ReferenceData;
use crate::{Error, Result};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Row acceptance rule for rows inside the region block
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No filtering
    #[default]
    All,
    /// Accept only rows whose status is in the set
    Codes(BTreeSet<String>),
}

impl StatusFilter {
    /// Build a filter from explicit codes
    ///
    /// Codes are trimmed and blank entries dropped. An empty list yields
    /// [`StatusFilter::All`].
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes: BTreeSet<String> = codes
            .into_iter()
            .map(|code| code.as_ref().trim().to_string())
            .filter(|code| !code.is_empty())
            .collect();

        if codes.is_empty() {
            StatusFilter::All
        } else {
            StatusFilter::Codes(codes)
        }
    }

    /// Build a filter from a comma-separated list (e.g. "102, 302")
    pub fn parse_list(list: &str) -> Self {
        Self::from_codes(list.split(','))
    }

    /// Build a filter from a named preset
    pub fn from_preset(reference: &ReferenceData, key: &str) -> Result<Self> {
        let preset = reference.preset(key).ok_or_else(|| {
            let known: Vec<&str> = reference
                .presets()
                .iter()
                .map(|preset| preset.key.as_str())
                .collect();
            Error::configuration(format!(
                "Unknown filter preset '{}'. Available presets: {}",
                key,
                known.join(", ")
            ))
        })?;
        Ok(Self::from_codes(&preset.codes))
    }

    /// Check if a status code passes the filter
    pub fn accepts(&self, status_code: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Codes(codes) => codes.contains(status_code.trim()),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, StatusFilter::Codes(_))
    }

    /// Filter codes in sorted order (empty when inactive)
    pub fn codes(&self) -> Vec<&str> {
        match self {
            StatusFilter::All => Vec::new(),
            StatusFilter::Codes(codes) => codes.iter().map(String::as_str).collect(),
        }
    }

    /// Log the active filter with a description per code
    pub fn describe(&self, reference: &ReferenceData) {
        match self {
            StatusFilter::All => info!("Status filter: none (all rows accepted)"),
            StatusFilter::Codes(codes) => {
                info!("Status filter active with {} code(s)", codes.len());
                for code in codes {
                    if reference.contains_status(code) {
                        info!("  {} - {}", code, reference.resolve_status(code));
                    } else {
                        warn!("  {} - {}", code, reference.resolve_status(code));
                    }
                }
            }
        }
    }

    /// One-line summary, e.g. "302" or "none"
    pub fn summary(&self) -> String {
        match self {
            StatusFilter::All => "none".to_string(),
            StatusFilter::Codes(_) => self.codes().join(","),
        }
    }
}

//! Output file naming
//!
//! Reports carry the run date before the extension, so two runs on the same
//! day target the same file and the later one replaces the earlier.

use crate::constants::{KMZ_FILE_SUFFIX, RUN_DATE_FORMAT};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

const DEFAULT_STEM: &str = "report";

/// Append the run date to a report path and force the `.xlsx` extension
///
/// `output/extract.xlsx` on 2025-07-15 becomes `output/extract_20250715.xlsx`.
pub fn dated_output_path(path: &Path, run_date: NaiveDate) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| DEFAULT_STEM.to_string());
    let file_name = format!("{}_{}.xlsx", stem, run_date.format(RUN_DATE_FORMAT));
    path.with_file_name(file_name)
}

/// KMZ path derived from a (dated) report path
///
/// `output/extract_20250715.xlsx` becomes `output/extract_20250715_PAC_PAL.kmz`.
pub fn kmz_path_for(report_path: &Path) -> PathBuf {
    let stem = report_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_STEM.to_string());
    report_path.with_file_name(format!("{}{}.kmz", stem, KMZ_FILE_SUFFIX))
}

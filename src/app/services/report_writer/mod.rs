//! Workbook generation
//!
//! Accepted records are sorted by municipality name and written one sheet per
//! municipality, with the enriched record columns in their fixed order.
//!
//! - [`sheet_name`]: sheet-name sanitizing for spreadsheet naming rules
//! - [`layout`]: column width sizing and cell formats
//! - [`writer`]: grouping and the workbook writer itself

pub mod layout;
pub mod sheet_name;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use sheet_name::sanitize_sheet_name;
pub use writer::{ReportStats, ReportWriter};

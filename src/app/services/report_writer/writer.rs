//! Multi-sheet workbook writer

use super::layout::{ColumnWidths, cell_format, header_format};
use super::sheet_name::sanitize_sheet_name;
use crate::app::models::{CellValue, EnrichedRecord};
use crate::app::services::extractor::{NullSink, ProgressSink, Reporter};
use crate::app::services::staged_file::StagedFile;
use crate::constants::{PROGRESS_SHEET_INTERVAL, REPORT_COLUMNS};
use crate::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of one workbook write
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportStats {
    pub path: PathBuf,
    /// Sheets in the saved workbook
    pub sheets_written: usize,
    /// Data rows across all sheets
    pub records_written: usize,
    /// Municipality groups dropped because a later group sanitized to the same sheet name
    pub sheets_replaced: usize,
    /// Size of the saved file in bytes
    pub file_size: u64,
}

/// One sheet to write: display name plus its rows in order
struct SheetGroup<'a> {
    name: String,
    records: Vec<&'a EnrichedRecord>,
}

/// Writes enriched records into a workbook, one sheet per municipality
pub struct ReportWriter<'a> {
    sink: &'a dyn ProgressSink,
}

impl Default for ReportWriter<'_> {
    fn default() -> Self {
        Self { sink: &NullSink }
    }
}

impl<'a> ReportWriter<'a> {
    pub fn new(sink: &'a dyn ProgressSink) -> Self {
        Self { sink }
    }

    /// Write the workbook to `output_path`
    ///
    /// The workbook is staged first and moved into place only when the caller
    /// is still listening; a failed or abandoned write leaves any existing
    /// file at `output_path` as it was.
    pub fn generate(&self, records: &[EnrichedRecord], output_path: &Path) -> Result<ReportStats> {
        let (staged, stats) = self.stage(records, output_path)?;
        if self.sink.is_abandoned() {
            return Err(Error::processing_interrupted(
                "Workbook discarded, caller abandoned the job",
            ));
        }
        staged.commit()?;
        Ok(stats)
    }

    /// Write the workbook into a staged file beside `output_path`
    ///
    /// Nothing appears at `output_path` until the returned file is committed.
    pub fn stage(
        &self,
        records: &[EnrichedRecord],
        output_path: &Path,
    ) -> Result<(StagedFile, ReportStats)> {
        let reporter = Reporter::new(self.sink);
        let path_str = output_path.display().to_string();

        if records.is_empty() {
            return Err(Error::report_write(&path_str, "No records to write", None));
        }

        let (groups, sheets_replaced) = group_by_sheet(records);
        reporter.info(format!(
            "Writing {} records into {} sheet(s): {}",
            records.len(),
            groups.len(),
            output_path.display()
        ));

        let staged = StagedFile::create(output_path)?;
        self.write_workbook(&groups, staged.path(), &reporter)
            .map_err(|e| Error::report_write(&path_str, e.to_string(), Some(e)))?;

        let records_written = groups.iter().map(|g| g.records.len()).sum();
        reporter.info(format!(
            "Workbook ready: {} sheet(s), {} row(s)",
            groups.len(),
            records_written
        ));

        let stats = ReportStats {
            path: output_path.to_path_buf(),
            sheets_written: groups.len(),
            records_written,
            sheets_replaced,
            file_size: staged.size(),
        };
        Ok((staged, stats))
    }

    fn write_workbook(
        &self,
        groups: &[SheetGroup<'_>],
        output_path: &Path,
        reporter: &Reporter<'_>,
    ) -> std::result::Result<(), XlsxError> {
        let mut workbook = Workbook::new();
        let header = header_format();
        let cell = cell_format();

        for (index, group) in groups.iter().enumerate() {
            let worksheet = workbook.add_worksheet();
            write_sheet(worksheet, group, &header, &cell)?;

            let written = index + 1;
            if written % PROGRESS_SHEET_INTERVAL == 0 || written == groups.len() {
                reporter.progress(
                    written as f64 / groups.len() as f64 * 100.0,
                    format!("Sheets written: {}/{}", written, groups.len()),
                );
            }
        }

        workbook.save(output_path)
    }
}

fn write_sheet(
    worksheet: &mut Worksheet,
    group: &SheetGroup<'_>,
    header: &Format,
    cell: &Format,
) -> std::result::Result<(), XlsxError> {
    worksheet.set_name(&group.name)?;

    for (col, title) in REPORT_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    let mut widths = ColumnWidths::from_headers();
    for (offset, record) in group.records.iter().enumerate() {
        let row = offset as u32 + 1;
        let cells = record.cells();
        widths.observe(&cells);

        for (col, value) in cells.iter().enumerate() {
            let col = col as u16;
            match *value {
                CellValue::Text(text) if !text.is_empty() => {
                    worksheet.write_string_with_format(row, col, text, cell)?;
                }
                CellValue::Number(number) => {
                    worksheet.write_number_with_format(row, col, number, cell)?;
                }
                CellValue::Text(_) | CellValue::Empty => {
                    worksheet.write_blank(row, col, cell)?;
                }
            }
        }
    }

    for (col, width) in widths.widths().enumerate() {
        worksheet.set_column_width(col as u16, width as f64)?;
    }

    debug!("Sheet '{}' written with {} rows", group.name, group.records.len());
    Ok(())
}

/// Sort by municipality (stable) and bucket into sheets
///
/// Two municipalities whose names sanitize to the same sheet name share a
/// slot; the later group replaces the earlier one. Returns the groups and
/// the number of replacements.
fn group_by_sheet(records: &[EnrichedRecord]) -> (Vec<SheetGroup<'_>>, usize) {
    let mut sorted: Vec<&EnrichedRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.municipality.cmp(&b.municipality));

    let mut groups: Vec<SheetGroup<'_>> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut replaced = 0;
    let mut current: Option<(&str, usize)> = None;

    for record in sorted {
        if let Some((municipality, slot)) = current {
            if municipality == record.municipality {
                groups[slot].records.push(record);
                continue;
            }
        }

        let name = sanitize_sheet_name(&record.municipality);
        let slot = match slots.get(&name.to_lowercase()) {
            Some(&slot) => {
                warn!(
                    "Sheet name '{}' reused by municipality '{}'; earlier sheet replaced",
                    name, record.municipality
                );
                replaced += 1;
                groups[slot] = SheetGroup {
                    name,
                    records: Vec::new(),
                };
                slot
            }
            None => {
                slots.insert(name.to_lowercase(), groups.len());
                groups.push(SheetGroup {
                    name,
                    records: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[slot].records.push(record);
        current = Some((record.municipality.as_str(), slot));
    }

    (groups, replaced)
}

//! Column sizing and cell formats

use crate::app::models::CellValue;
use crate::constants::{COLUMN_WIDTH_PADDING, MAX_COLUMN_WIDTH, MIN_COLUMN_WIDTH, REPORT_COLUMNS};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder};

/// Running maximum content length per report column
#[derive(Debug, Clone)]
pub struct ColumnWidths {
    max_lens: [usize; REPORT_COLUMNS.len()],
}

impl ColumnWidths {
    /// Start from the header lengths
    pub fn from_headers() -> Self {
        let mut max_lens = [0; REPORT_COLUMNS.len()];
        for (slot, header) in max_lens.iter_mut().zip(REPORT_COLUMNS) {
            *slot = header.chars().count();
        }
        Self { max_lens }
    }

    pub fn observe(&mut self, cells: &[CellValue<'_>]) {
        for (slot, cell) in self.max_lens.iter_mut().zip(cells) {
            *slot = (*slot).max(cell.display_len());
        }
    }

    /// Width of each column in character units
    pub fn widths(&self) -> impl Iterator<Item = usize> + '_ {
        self.max_lens.iter().map(|&len| clamp_width(len))
    }
}

/// Padded width clamped to the readable range
pub fn clamp_width(max_len: usize) -> usize {
    (max_len + COLUMN_WIDTH_PADDING).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}

/// Bordered, centered cell format
pub fn cell_format() -> Format {
    Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

/// Header row format
pub fn header_format() -> Format {
    cell_format().set_bold()
}

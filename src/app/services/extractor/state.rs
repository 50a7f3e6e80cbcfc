//! Region block state machine
//!
//! Rows of one region are contiguous in the dataset, so the scan only needs
//! to find where the block starts and stop at the first row after it.

/// Scan position relative to the target region block
///
/// Row indices are 1-based positions in the data rows (header excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No target row seen yet
    Searching,
    /// Inside the block that started at `start_row`
    InRegion { start_row: u64 },
    /// Block finished; `end_row` is the first row after it
    Done { start_row: u64, end_row: u64 },
}

/// What the scan should do with the row just observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Outside the block, ignore
    Skip,
    /// Inside the block, enrich and filter
    Process,
    /// Block ended, stop reading
    Stop,
}

/// Tracks the scan through the target region block
#[derive(Debug, Clone)]
pub struct RegionTracker {
    target: String,
    state: ScanState,
}

impl RegionTracker {
    pub fn new(target_region: &str) -> Self {
        Self {
            target: target_region.trim().to_string(),
            state: ScanState::Searching,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, ScanState::Done { .. })
    }

    /// Feed the trimmed region code of row `row_index`
    pub fn observe(&mut self, region: &str, row_index: u64) -> RowAction {
        let is_target = region == self.target;
        match self.state {
            ScanState::Searching if is_target => {
                self.state = ScanState::InRegion {
                    start_row: row_index,
                };
                RowAction::Process
            }
            ScanState::Searching => RowAction::Skip,
            ScanState::InRegion { .. } if is_target => RowAction::Process,
            ScanState::InRegion { start_row } => {
                self.state = ScanState::Done {
                    start_row,
                    end_row: row_index,
                };
                RowAction::Stop
            }
            ScanState::Done { .. } => RowAction::Stop,
        }
    }

    /// First row of the block, once found
    pub fn start_row(&self) -> Option<u64> {
        match self.state {
            ScanState::Searching => None,
            ScanState::InRegion { start_row } | ScanState::Done { start_row, .. } => {
                Some(start_row)
            }
        }
    }

    /// First row after the block; `None` while scanning or when the block runs to EOF
    pub fn end_row(&self) -> Option<u64> {
        match self.state {
            ScanState::Done { end_row, .. } => Some(end_row),
            _ => None,
        }
    }
}

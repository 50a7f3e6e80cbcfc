//! Output files staged beside their destination
//!
//! Writers fill a hidden temp file in the destination directory and rename it
//! over the final path only once the content is complete. An existing file at
//! the destination stays untouched until that rename; a staged file that is
//! dropped without being committed is deleted.

use crate::{Error, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Create an empty temp file next to `target`, creating directories as needed
    pub fn create(target: &Path) -> Result<Self> {
        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| {
            Error::io(format!("Failed to create directory {}", parent.display()), e)
        })?;

        let temp = tempfile::Builder::new()
            .prefix(".")
            .suffix(".partial")
            .tempfile_in(parent)
            .map_err(|e| {
                Error::io(
                    format!("Failed to create temp file in {}", parent.display()),
                    e,
                )
            })?;
        debug!(
            "Staging {} at {}",
            target.display(),
            temp.path().display()
        );

        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    /// Path of the temp file being written
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn file_mut(&mut self) -> &mut File {
        self.temp.as_file_mut()
    }

    /// Current size of the staged content in bytes
    pub fn size(&self) -> u64 {
        fs::metadata(self.temp.path()).map(|m| m.len()).unwrap_or(0)
    }

    /// Move the staged content over the target path
    pub fn commit(self) -> Result<PathBuf> {
        let Self { temp, target } = self;
        temp.persist(&target).map_err(|e| {
            Error::io(
                format!("Failed to move output into place at {}", target.display()),
                e.error,
            )
        })?;
        debug!("Committed {}", target.display());
        Ok(target)
    }
}

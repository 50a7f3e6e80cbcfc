//! KMZ packaging

use crate::app::services::staged_file::StagedFile;
use crate::constants::KML_ENTRY_NAME;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Write `kml` as the single deflated entry of a KMZ archive staged beside `path`
///
/// Parent directories are created as needed. The archive reaches `path` only
/// when the returned file is committed.
pub fn stage_kmz(path: &Path, kml: &[u8]) -> Result<StagedFile> {
    let mut staged = StagedFile::create(path)?;
    write_archive(staged.file_mut(), kml)
        .map_err(|e| Error::geo_export(path.display().to_string(), e.to_string()))?;

    debug!("KMZ staged for {} ({} bytes)", path.display(), staged.size());
    Ok(staged)
}

fn write_archive(file: &mut File, kml: &[u8]) -> anyhow::Result<()> {
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file(KML_ENTRY_NAME, options)?;
    zip.write_all(kml)?;

    let mut writer = zip.finish()?;
    writer.flush()?;
    Ok(())
}

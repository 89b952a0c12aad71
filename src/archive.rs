//! ZIP extraction.

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use zip::ZipArchive;

use crate::error::{Result, ScrubError};

fn archive_error(path: &Path, reason: impl Into<String>) -> ScrubError {
    ScrubError::Archive {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Extracts every entry of `archive_path` below `destination` and returns the
/// paths of the files written.
///
/// Entries whose names would escape `destination` are skipped.
pub fn extract_zip(archive_path: &Path, destination: &Path) -> Result<Vec<PathBuf>> {
    info!("Extracting {archive_path:?} to {destination:?}");
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|err| archive_error(archive_path, format!("not a readable ZIP archive: {err}")))?;
    fs::create_dir_all(destination)?;

    let mut extracted = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|err| {
            archive_error(archive_path, format!("failed to read entry {index}: {err}"))
        })?;
        let target = match entry.enclosed_name() {
            Some(relative) => destination.join(relative),
            None => {
                warn!("Skipping entry with unsafe path: {}", entry.name());
                continue;
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut outfile = File::create(&target)?;
        io::copy(&mut entry, &mut outfile).map_err(|err| {
            archive_error(archive_path, format!("failed to extract {}: {err}", entry.name()))
        })?;
        debug!("Extracted {target:?} ({} bytes)", entry.size());
        extracted.push(target);
    }

    info!("Extracted {} file(s) to {destination:?}", extracted.len());
    Ok(extracted)
}

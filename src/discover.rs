use std::path::{Path, PathBuf};

use log::info;
use walkdir::WalkDir;

use crate::error::{Result, ScrubError};

/// Lists every regular file below `directory`, sorted by name at each level.
pub fn list_files(directory: &Path) -> Result<Vec<PathBuf>> {
    info!("Listing files in {directory:?}");
    let mut files = Vec::new();
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            std::io::Error::other(format!("failed to walk {directory:?}: {err}"))
        })?;
        if entry.file_type().is_file() {
            info!("Found file: {:?}", entry.path());
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Returns the first listed file whose name ends with `extension`.
pub fn find_with_extension<'a>(files: &'a [PathBuf], extension: &str) -> Option<&'a Path> {
    files
        .iter()
        .find(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().ends_with(extension))
                .unwrap_or(false)
        })
        .map(PathBuf::as_path)
}

/// Tries `extensions` in priority order and returns the first match.
pub fn discover_data_file(directory: &Path, extensions: &[String]) -> Result<PathBuf> {
    let files = list_files(directory)?;
    for (idx, extension) in extensions.iter().enumerate() {
        info!("Looking for files with {extension} extension in {directory:?}");
        if let Some(found) = find_with_extension(&files, extension) {
            info!("Found file with {extension} extension: {found:?}");
            return Ok(found.to_path_buf());
        }
        if let Some(next) = extensions.get(idx + 1) {
            info!("No {extension} file found. Falling back to {next}");
        }
    }
    Err(ScrubError::NoMatchingFile {
        directory: directory.to_path_buf(),
        extensions: extensions.to_vec(),
    })
}

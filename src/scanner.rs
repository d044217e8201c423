//! Non-recursive listing of the files directly inside a folder.
//!
//! Only regular files are returned. Directories (including category
//! subfolders from earlier runs) and symbolic links are skipped; links are
//! never followed, so a link to a file is left where it is.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::ScanError;

/// Checks that `folder` exists and is a directory.
pub fn validate_folder(folder: &Path) -> Result<(), ScanError> {
    let metadata = fs::metadata(folder).map_err(|e| ScanError::io(folder, e))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory {
            path: folder.to_path_buf(),
        });
    }
    Ok(())
}

/// Lists the names of the regular files directly inside `folder`.
///
/// The order is whatever the directory listing yields. Entries whose name is
/// not valid UTF-8 are skipped with a warning.
///
/// # Errors
///
/// Returns `NotFound`, `NotADirectory` or `AccessDenied` when the folder
/// cannot be listed.
///
/// # Examples
///
/// ```no_run
/// use foldsort::scanner::list_files;
/// use std::path::Path;
///
/// for name in list_files(Path::new("/home/user/Downloads"))? {
///     println!("{name}");
/// }
/// # Ok::<(), foldsort::ScanError>(())
/// ```
pub fn list_files(folder: &Path) -> Result<Vec<String>, ScanError> {
    validate_folder(folder)?;

    let entries = fs::read_dir(folder).map_err(|e| ScanError::io(folder, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::io(folder, e))?;

        // file_type() does not traverse symlinks
        let is_file = match entry.file_type() {
            Ok(file_type) => file_type.is_file(),
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "cannot stat entry, skipping");
                false
            }
        };
        if !is_file {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => files.push(name),
            Err(raw) => {
                warn!(name = ?raw, "skipping file with non UTF-8 name");
            }
        }
    }

    debug!(folder = %folder.display(), count = files.len(), "scanned folder");
    Ok(files)
}

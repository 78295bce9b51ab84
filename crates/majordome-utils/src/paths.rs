//! Path resolution helpers
//!
//! Small wrappers used when packages need to locate configuration files
//! that ship next to their own sources.

use std::io;
use std::path::{Path, PathBuf};

/// Resolved parent directory of `file`
///
/// The path is canonicalized first, so the result is absolute with
/// symlinks resolved. Fails when the file does not exist or sits at the
/// filesystem root.
pub fn file_directory(file: impl AsRef<Path>) -> io::Result<PathBuf> {
    let resolved = file.as_ref().canonicalize()?;
    resolved
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "path has no parent directory"))
}

/// Resolved path of a configuration file relative to the parent of `file`
pub fn config_path(file: impl AsRef<Path>, relative: impl AsRef<Path>) -> io::Result<PathBuf> {
    Ok(file_directory(file)?.join(relative))
}

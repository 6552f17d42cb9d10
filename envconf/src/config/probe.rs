//! Best-effort filesystem probing.

use std::fs;
use std::path::Path;

/// Returns `true` if `path` denotes a directory.
///
/// Any filesystem error (missing path, permission denied, broken symlink)
/// is reported as "not a directory"; this never fails.
///
/// # Examples
///
/// ```
/// use envconf::config::is_directory;
/// use std::path::Path;
///
/// assert!(!is_directory(Path::new("/definitely/not/here")));
/// ```
#[must_use]
pub fn is_directory(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_dir()).unwrap_or(false)
}

//! Search-path executable lookup.

use std::ffi::OsStr;
use std::path::PathBuf;

/// Find an executable by name on a search path.
///
/// When `search_path` is `None` the process `PATH` is used, through the
/// `which` crate so that platform rules (`PATHEXT`, executable bits) apply.
/// A custom search path uses the same separator syntax as `PATH`.
///
/// # Returns
///
/// `Some(PathBuf)` if the executable is found, `None` otherwise.
pub(crate) fn find_executable(name: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    match search_path {
        None => which::which(name).ok(),
        Some(paths) => {
            let cwd = std::env::current_dir().ok()?;
            which::which_in(name, Some(paths), cwd).ok()
        }
    }
}

//! Archive extraction for release downloads.
//!
//! Two extractors are provided, chosen by the platform rather than by
//! inspecting the file:
//!
//! - [`extract_tar`] for the gzip-compressed tarballs shipped to Unix-like
//!   platforms
//! - [`extract_zip`] for the zip archives shipped to Windows
//!
//! Both resolve every entry through the same containment check and fail with
//! [`InstallError::PathTraversal`](crate::InstallError::PathTraversal) before
//! writing an entry whose destination would leave the target directory.
//! Neither rolls back on failure: after an error the target directory may be
//! partially populated.

mod guard;
mod untar;
mod unzip;

use std::path::{Path, PathBuf};

use crate::{ArchiveKind, InstallError};

pub use untar::extract_tar;
pub use unzip::extract_zip;

/// Extract `archive` into `target_dir` with the extractor for `kind`.
pub fn extract(
    kind: ArchiveKind,
    archive: &Path,
    target_dir: &Path,
) -> Result<Vec<PathBuf>, InstallError> {
    match kind {
        ArchiveKind::TarGz => extract_tar(archive, target_dir),
        ArchiveKind::Zip => extract_zip(archive, target_dir),
    }
}

#[cfg(unix)]
pub(crate) fn set_mode(path: &Path, mode: u32) -> Result<(), InstallError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| InstallError::filesystem(path, e))
}

#[cfg(not(unix))]
pub(crate) fn set_mode(_path: &Path, _mode: u32) -> Result<(), InstallError> {
    Ok(())
}

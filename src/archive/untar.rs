//! Gzip-compressed tar extraction.

use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tar::{Archive, EntryType};

use super::guard::{entry_destination, is_root_entry};
use super::set_mode;
use crate::InstallError;

/// Extract a `.tar.gz` archive into `target_dir`.
///
/// Entries are processed in archive order. Directories that do not exist yet
/// are created and get their stored mode once every entry is written;
/// existing directories keep theirs. A directory entry naming the target
/// itself (`./`, as written by `tar -C dir .`) only ensures the target
/// exists. Regular files are created or truncated, filled with the entry
/// content, and given their stored mode. Extension headers are skipped.
/// Links and special files are rejected with
/// [`InstallError::UnsupportedEntry`].
///
/// Extraction stops at the first error and returns it. On success the
/// destination of every extracted entry is returned in archive order.
pub fn extract_tar(archive: &Path, target_dir: &Path) -> Result<Vec<PathBuf>, InstallError> {
    let file = File::open(archive).map_err(|e| InstallError::filesystem(archive, e))?;
    let mut tarball = Archive::new(GzDecoder::new(file));
    let entries = tarball
        .entries()
        .map_err(|e| InstallError::extraction(archive, e))?;

    let mut written = Vec::new();
    let mut created_dirs = Vec::new();
    for entry in entries {
        let mut entry = entry.map_err(|e| InstallError::extraction(archive, e))?;
        let entry_type = entry.header().entry_type();
        if matches!(
            entry_type,
            EntryType::XGlobalHeader
                | EntryType::XHeader
                | EntryType::GNULongName
                | EntryType::GNULongLink
        ) {
            continue;
        }

        let name = entry
            .path()
            .map_err(|e| InstallError::extraction(archive, e))?
            .into_owned();
        if entry_type == EntryType::Directory && is_root_entry(&name) {
            fs::create_dir_all(target_dir).map_err(|e| InstallError::filesystem(target_dir, e))?;
            continue;
        }
        let destination = entry_destination(target_dir, &name)?;
        let mode = entry
            .header()
            .mode()
            .map_err(|e| InstallError::extraction(archive, e))?
            & 0o7777;

        match entry_type {
            EntryType::Directory => {
                let existed = destination.is_dir();
                fs::create_dir_all(&destination)
                    .map_err(|e| InstallError::filesystem(&destination, e))?;
                if !existed {
                    created_dirs.push((destination.clone(), mode));
                }
            }
            EntryType::Regular | EntryType::Continuous => {
                if let Some(parent) = destination.parent() {
                    fs::create_dir_all(parent).map_err(|e| InstallError::filesystem(parent, e))?;
                }
                {
                    let mut out = File::create(&destination)
                        .map_err(|e| InstallError::filesystem(&destination, e))?;
                    io::copy(&mut entry, &mut out)
                        .map_err(|e| InstallError::filesystem(&destination, e))?;
                }
                set_mode(&destination, mode)?;
            }
            other => {
                return Err(InstallError::UnsupportedEntry {
                    entry: name.display().to_string(),
                    kind: format!("{other:?}"),
                });
            }
        }

        written.push(destination);
    }

    // Reverse archive order: children before their parents.
    for (dir, mode) in created_dirs.iter().rev() {
        set_mode(dir, *mode)?;
    }

    Ok(written)
}

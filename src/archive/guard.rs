//! Lexical containment check for archive entry names.

use std::path::{Component, Path, PathBuf};

use crate::InstallError;

/// Resolve an archive entry name to its destination under `target`.
///
/// The name is cleaned lexically: `.` segments are dropped and `..` segments
/// remove the previous segment. The entry is rejected with
/// [`InstallError::PathTraversal`] when it is absolute, carries a drive
/// prefix, climbs above `target`, or resolves to `target` itself.
pub(crate) fn entry_destination(target: &Path, entry: &Path) -> Result<PathBuf, InstallError> {
    let relative = clean(entry)?;
    if relative.as_os_str().is_empty() {
        return Err(traversal(entry));
    }
    Ok(target.join(relative))
}

/// Whether `entry` names the extraction root itself, such as `./`.
pub(crate) fn is_root_entry(entry: &Path) -> bool {
    matches!(clean(entry), Ok(relative) if relative.as_os_str().is_empty())
}

fn clean(entry: &Path) -> Result<PathBuf, InstallError> {
    let mut relative = PathBuf::new();
    for component in entry.components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !relative.pop() {
                    return Err(traversal(entry));
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(traversal(entry)),
        }
    }
    Ok(relative)
}

fn traversal(entry: &Path) -> InstallError {
    InstallError::PathTraversal {
        entry: entry.display().to_string(),
    }
}

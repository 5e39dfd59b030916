//! Zip extraction.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

use super::guard::entry_destination;
use super::set_mode;
use crate::InstallError;

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;
const DEFAULT_FILE_MODE: u32 = 0o644;

/// Extract a zip archive into `target_dir`.
///
/// Entries are processed in archive order. Each destination is checked for
/// containment before anything is written, so a crafted entry such as
/// `../evil.exe` fails with [`InstallError::PathTraversal`] and is never
/// created. Directory entries are created with default permissions. File
/// entries get their parent directory created, their content written, and
/// their stored unix permission bits applied (`0o644` when none are stored).
/// Symlink entries are rejected with [`InstallError::UnsupportedEntry`].
///
/// Returns the destination of every extracted entry in archive order.
/// Extraction stops at the first failing entry and nothing is rolled back.
///
/// # Example
///
/// ```rust,no_run
/// use pglet_bootstrap::extract_zip;
/// use std::path::Path;
///
/// let written = extract_zip(Path::new("pglet.zip"), Path::new("out")).unwrap();
/// for path in written {
///     println!("{}", path.display());
/// }
/// ```
pub fn extract_zip(archive: &Path, target_dir: &Path) -> Result<Vec<PathBuf>, InstallError> {
    let file = File::open(archive).map_err(|e| InstallError::filesystem(archive, e))?;
    let mut zip = ZipArchive::new(file).map_err(|e| InstallError::extraction(archive, e))?;

    let mut written = Vec::with_capacity(zip.len());
    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| InstallError::extraction(archive, e))?;
        let name = entry.name().to_string();
        let destination = entry_destination(target_dir, Path::new(&name))?;
        let unix_mode = entry.unix_mode();

        if entry.is_dir() {
            fs::create_dir_all(&destination)
                .map_err(|e| InstallError::filesystem(&destination, e))?;
        } else if unix_mode.is_some_and(|mode| mode & S_IFMT == S_IFLNK) {
            return Err(InstallError::UnsupportedEntry {
                entry: name,
                kind: "Symlink".to_string(),
            });
        } else {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).map_err(|e| InstallError::filesystem(parent, e))?;
            }
            {
                let mut out = File::create(&destination)
                    .map_err(|e| InstallError::filesystem(&destination, e))?;
                io::copy(&mut entry, &mut out)
                    .map_err(|e| InstallError::filesystem(&destination, e))?;
            }
            let mode = unix_mode
                .map(|mode| mode & 0o7777)
                .filter(|mode| *mode != 0)
                .unwrap_or(DEFAULT_FILE_MODE);
            set_mode(&destination, mode)?;
        }

        written.push(destination);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const BINARY: &[u8] = b"MZ\x90\x00pglet";

    fn options(mode: u32) -> SimpleFileOptions {
        SimpleFileOptions::default().unix_permissions(mode)
    }

    #[test]
    fn test_directory_and_file_roundtrip() {
        let scratch = tempfile::tempdir().unwrap();
        let archive = scratch.path().join("pglet.zip");
        let target = scratch.path().join("out");
        fs::create_dir(&target).unwrap();

        let mut zip = ZipWriter::new(File::create(&archive).unwrap());
        zip.add_directory("bin/", options(0o755)).unwrap();
        zip.start_file("bin/pglet.exe", options(0o755)).unwrap();
        zip.write_all(BINARY).unwrap();
        zip.finish().unwrap();

        let written = extract_zip(&archive, &target).unwrap();

        assert_eq!(
            written,
            vec![target.join("bin"), target.join("bin").join("pglet.exe")]
        );
        assert!(target.join("bin").is_dir());
        assert_eq!(fs::read(target.join("bin").join("pglet.exe")).unwrap(), BINARY);
    }

    #[test]
    fn test_file_without_directory_entry() {
        let scratch = tempfile::tempdir().unwrap();
        let archive = scratch.path().join("pglet.zip");
        let target = scratch.path().join("out");
        fs::create_dir(&target).unwrap();

        let mut zip = ZipWriter::new(File::create(&archive).unwrap());
        zip.start_file("nested/deeper/pglet.exe", options(0o644)).unwrap();
        zip.write_all(BINARY).unwrap();
        zip.finish().unwrap();

        extract_zip(&archive, &target).unwrap();
        assert_eq!(
            fs::read(target.join("nested/deeper/pglet.exe")).unwrap(),
            BINARY
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_file_mode_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let scratch = tempfile::tempdir().unwrap();
        let archive = scratch.path().join("pglet.zip");
        let target = scratch.path().join("out");
        fs::create_dir(&target).unwrap();

        let mut zip = ZipWriter::new(File::create(&archive).unwrap());
        zip.start_file("pglet", options(0o700)).unwrap();
        zip.write_all(BINARY).unwrap();
        zip.finish().unwrap();

        extract_zip(&archive, &target).unwrap();
        let mode = fs::metadata(target.join("pglet")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn test_parent_traversal_rejected() {
        let scratch = tempfile::tempdir().unwrap();
        let archive = scratch.path().join("evil.zip");
        let target = scratch.path().join("out");
        fs::create_dir(&target).unwrap();

        let mut zip = ZipWriter::new(File::create(&archive).unwrap());
        zip.start_file("ok.txt", options(0o644)).unwrap();
        zip.write_all(b"ok").unwrap();
        zip.start_file("../evil.txt", options(0o644)).unwrap();
        zip.write_all(b"evil").unwrap();
        zip.start_file("after.txt", options(0o644)).unwrap();
        zip.write_all(b"after").unwrap();
        zip.finish().unwrap();

        let result = extract_zip(&archive, &target);

        match result {
            Err(InstallError::PathTraversal { entry }) => assert_eq!(entry, "../evil.txt"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!scratch.path().join("evil.txt").exists());
        // Entries before the offending one stay; later ones are never reached.
        assert!(target.join("ok.txt").exists());
        assert!(!target.join("after.txt").exists());
    }

    #[test]
    fn test_symlink_rejected() {
        let scratch = tempfile::tempdir().unwrap();
        let archive = scratch.path().join("link.zip");
        let target = scratch.path().join("out");
        fs::create_dir(&target).unwrap();

        let mut zip = ZipWriter::new(File::create(&archive).unwrap());
        zip.add_symlink("pglet.exe", "/etc/passwd", SimpleFileOptions::default())
            .unwrap();
        zip.finish().unwrap();

        let result = extract_zip(&archive, &target);

        match result {
            Err(InstallError::UnsupportedEntry { entry, .. }) => assert_eq!(entry, "pglet.exe"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(fs::symlink_metadata(target.join("pglet.exe")).is_err());
    }

    #[test]
    fn test_corrupt_archive() {
        let scratch = tempfile::tempdir().unwrap();
        let archive = scratch.path().join("broken.zip");
        fs::write(&archive, b"<html>Not Found</html>").unwrap();

        let result = extract_zip(&archive, scratch.path());
        assert!(matches!(result, Err(InstallError::Extraction { .. })));
    }
}

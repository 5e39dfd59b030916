//! Install target and installed-state types.

use semver::Version;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::detection::probe_version;
use crate::{InstallError, Platform};

/// Base name of the managed executable.
pub const EXECUTABLE_BASE_NAME: &str = "pglet";

/// What must be installed, and where.
///
/// Built once per install call and never mutated afterwards.
///
/// # Example
///
/// ```rust
/// use pglet_bootstrap::{Arch, InstallTarget, Os, Platform};
///
/// let target = InstallTarget::new(
///     "0.2.2",
///     Platform::new(Os::Linux, Arch::Amd64),
///     "/home/me/.pglet/bin",
/// )
/// .unwrap();
/// assert_eq!(
///     target.download_url("https://github.com/pglet/pglet/releases/download"),
///     "https://github.com/pglet/pglet/releases/download/v0.2.2/pglet-0.2.2-linux-amd64.tar.gz"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    required_version: String,
    platform: Platform,
    install_dir: PathBuf,
    executable_name: String,
}

impl InstallTarget {
    /// Create a target, validating that `required_version` is a semantic version.
    pub fn new(
        required_version: impl Into<String>,
        platform: Platform,
        install_dir: impl Into<PathBuf>,
    ) -> Result<Self, InstallError> {
        let required_version = required_version.into();
        Version::parse(&required_version).map_err(|source| InstallError::InvalidVersion {
            version: required_version.clone(),
            source,
        })?;

        Ok(Self {
            executable_name: platform.executable_name(EXECUTABLE_BASE_NAME),
            required_version,
            platform,
            install_dir: install_dir.into(),
        })
    }

    /// Version that must be installed.
    pub fn required_version(&self) -> &str {
        &self.required_version
    }

    /// Platform the release is chosen for.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Private install directory.
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Platform-specific executable file name.
    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    /// Where the executable lives inside the install directory.
    pub fn executable_path(&self) -> PathBuf {
        self.install_dir.join(&self.executable_name)
    }

    /// File name of the release archive for this version and platform.
    pub fn archive_name(&self) -> String {
        format!(
            "{}-{}-{}-{}.{}",
            EXECUTABLE_BASE_NAME,
            self.required_version,
            self.platform.os.release_tag(),
            self.platform.arch.release_tag(),
            self.platform.archive_kind().extension()
        )
    }

    /// Full download URL of the release archive under `base_url`.
    pub fn download_url(&self, base_url: &str) -> String {
        format!(
            "{}/v{}/{}",
            base_url.trim_end_matches('/'),
            self.required_version,
            self.archive_name()
        )
    }
}

/// What is currently installed in the private directory.
///
/// Derived from the filesystem on every call and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledState {
    /// Path of the installed executable, if the file exists.
    pub executable_path: Option<PathBuf>,

    /// Version the executable reported, if the probe succeeded.
    pub detected_version: Option<String>,
}

impl InstalledState {
    /// Inspect the private install directory of `target`.
    ///
    /// A failed probe leaves `detected_version` empty so the caller
    /// reinstalls instead of aborting.
    pub async fn inspect(target: &InstallTarget, probe_timeout: Duration) -> Self {
        let path = target.executable_path();
        if !path.is_file() {
            return Self::default();
        }

        let detected_version = match probe_version(&path, probe_timeout).await {
            Ok(version) => Some(version),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read installed version, reinstalling");
                None
            }
        };

        Self {
            executable_path: Some(path),
            detected_version,
        }
    }

    /// Whether the installed executable reports exactly `required`.
    pub fn satisfies(&self, required: &str) -> bool {
        self.executable_path.is_some() && self.detected_version.as_deref() == Some(required)
    }
}

/// How the returned executable was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallSource {
    /// Found on the search path; version was not checked.
    SearchPath,
    /// Already installed in the private directory with the right version.
    Existing,
    /// Downloaded and extracted by this call.
    Downloaded,
}

/// A usable pglet executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    /// Path to the executable.
    pub path: PathBuf,

    /// Version reported by the executable, when it was probed.
    pub version: Option<String>,

    /// How the executable was obtained.
    pub source: InstallSource,
}

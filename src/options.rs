//! Installation options configuration.
//!
//! This module provides the [`InstallOptions`] struct for configuring where
//! pglet is looked up, where it is installed, and how long downloads and
//! version probes may take.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use crate::Platform;

/// The pglet version this library is built against.
pub const PGLET_VERSION: &str = "0.2.2";

/// Location pglet release archives are downloaded from.
pub const DEFAULT_BASE_URL: &str = "https://github.com/pglet/pglet/releases/download";

/// Configuration options for installation.
///
/// # Default Behavior
///
/// By default the installer requires [`PGLET_VERSION`], downloads from
/// [`DEFAULT_BASE_URL`], searches the process `PATH`, installs into
/// `~/.pglet/bin`, and classifies the host platform at call time.
///
/// # Example
///
/// ```rust
/// use pglet_bootstrap::InstallOptions;
/// use std::time::Duration;
///
/// // Default options
/// let opts = InstallOptions::default();
///
/// // Install somewhere else with a shorter download timeout
/// let opts = InstallOptions {
///     install_dir: Some("/opt/pglet/bin".into()),
///     download_timeout: Duration::from_secs(60),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Version that must be installed.
    ///
    /// Default: [`PGLET_VERSION`]
    pub version: String,

    /// Base URL releases are published under.
    ///
    /// The archive URL is `{base_url}/v{version}/pglet-{version}-{os}-{arch}.{ext}`.
    ///
    /// Default: [`DEFAULT_BASE_URL`]
    pub base_url: String,

    /// Private directory the executable is installed into.
    ///
    /// Default: `None` (resolves to `~/.pglet/bin`)
    pub install_dir: Option<PathBuf>,

    /// Search path used for the development override lookup.
    ///
    /// Uses the same syntax as the `PATH` environment variable.
    ///
    /// Default: `None` (uses `PATH`)
    pub search_path: Option<OsString>,

    /// Platform to install for.
    ///
    /// Default: `None` (uses [`Platform::current`])
    pub platform: Option<Platform>,

    /// Maximum time for the whole archive download.
    ///
    /// Default: 300 seconds
    pub download_timeout: Duration,

    /// Maximum time for a `--version` probe.
    ///
    /// Default: 5 seconds
    pub probe_timeout: Duration,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            version: PGLET_VERSION.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            install_dir: None,
            search_path: None,
            platform: None,
            download_timeout: Duration::from_secs(300),
            probe_timeout: Duration::from_secs(5),
        }
    }
}

/// Default private install directory: `<home>/.pglet/bin`.
///
/// Returns `None` when the home directory cannot be determined.
pub fn default_install_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pglet").join("bin"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arch, Os};

    #[test]
    fn test_defaults() {
        let opts = InstallOptions::default();
        assert_eq!(opts.version, "0.2.2");
        assert_eq!(opts.base_url, DEFAULT_BASE_URL);
        assert!(opts.install_dir.is_none());
        assert!(opts.search_path.is_none());
        assert!(opts.platform.is_none());
        assert_eq!(opts.download_timeout, Duration::from_secs(300));
        assert_eq!(opts.probe_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_struct_update() {
        let opts = InstallOptions {
            platform: Some(Platform::new(Os::Windows, Arch::Amd64)),
            probe_timeout: Duration::from_millis(500),
            ..Default::default()
        };
        assert_eq!(opts.probe_timeout, Duration::from_millis(500));
        assert_eq!(opts.version, PGLET_VERSION);
        assert!(opts.platform.unwrap().os.is_windows());
    }

    #[test]
    fn test_default_install_dir_layout() {
        if let Some(dir) = default_install_dir() {
            assert!(dir.ends_with(".pglet/bin"));
        }
    }
}

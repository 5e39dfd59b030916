//! Progress reporting types for installation.
//!
//! The [`InstallProgress`] enum represents the discrete stages an install
//! call passes through. Stages are delivered in order to the callback given
//! to [`Installer::ensure_installed_with_progress`](crate::Installer::ensure_installed_with_progress);
//! stages that are not reached are not reported.

use std::path::PathBuf;

use crate::InstallSource;

/// Progress stages during installation.
///
/// # Example
///
/// ```rust
/// use pglet_bootstrap::InstallProgress;
///
/// fn on_progress(progress: InstallProgress) {
///     match &progress {
///         InstallProgress::Started { version } => println!("Ensuring pglet {version}"),
///         InstallProgress::Probing { path } => println!("Checking {}", path.display()),
///         InstallProgress::Downloading { url } => println!("Downloading {url}"),
///         InstallProgress::Extracting { destination, .. } => {
///             println!("Extracting into {}", destination.display())
///         }
///         InstallProgress::Verifying { path } => println!("Verifying {}", path.display()),
///         InstallProgress::Completed { path, .. } => println!("Ready: {}", path.display()),
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallProgress {
    /// The install call has started.
    Started {
        /// Version being ensured.
        version: String,
    },

    /// A previously installed executable is being probed.
    Probing {
        /// Executable being probed.
        path: PathBuf,
    },

    /// The release archive is being downloaded.
    Downloading {
        /// Archive URL.
        url: String,
    },

    /// The release archive is being extracted.
    Extracting {
        /// Downloaded archive.
        archive: PathBuf,
        /// Private install directory.
        destination: PathBuf,
    },

    /// The extracted executable is being checked.
    Verifying {
        /// Extracted executable.
        path: PathBuf,
    },

    /// A usable executable is available.
    Completed {
        /// Executable path.
        path: PathBuf,
        /// How it was obtained.
        source: InstallSource,
    },
}

impl InstallProgress {
    /// Short stage name for log lines and status displays.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Started { .. } => "started",
            Self::Probing { .. } => "probing",
            Self::Downloading { .. } => "downloading",
            Self::Extracting { .. } => "extracting",
            Self::Verifying { .. } => "verifying",
            Self::Completed { .. } => "completed",
        }
    }
}

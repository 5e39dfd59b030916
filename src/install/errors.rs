//! Error types for installation operations.
//!
//! Every failure the installer can hit surfaces as one [`InstallError`].
//! Each variant carries enough context to name what failed, and
//! [`InstallError::fix_suggestion`] turns it into an actionable hint for the
//! person reading the message.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Why a version probe could not produce a version string.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProbeError {
    /// The executable could not be started.
    #[error("failed to run executable: {0}")]
    Spawn(#[source] std::io::Error),

    /// The executable did not exit within the probe timeout.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The executable exited with a non-zero status.
    #[error("exited with {}: {output}", exit_code_label(.code))]
    ExitStatus {
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Trimmed combined output of the failed run.
        output: String,
    },

    /// The executable printed nothing.
    #[error("reported an empty version")]
    EmptyOutput,
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "signal".to_string(),
    }
}

/// Errors that can occur while ensuring pglet is installed.
///
/// # Example
///
/// ```rust
/// use pglet_bootstrap::InstallError;
///
/// fn report(error: &InstallError) {
///     eprintln!("pglet installation failed: {}", error);
///     eprintln!("To fix: {}", error.fix_suggestion());
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InstallError {
    /// The private install directory cannot be resolved or created.
    #[error("Environment error: {message}")]
    Environment {
        /// What could not be done.
        message: String,
        /// Underlying I/O error, if any.
        #[source]
        source: Option<std::io::Error>,
    },

    /// No pglet release exists for this OS or architecture.
    #[error("Platform not supported: {os}/{arch}")]
    UnsupportedPlatform {
        /// Host OS as reported by the standard library.
        os: String,
        /// Host architecture as reported by the standard library.
        arch: String,
    },

    /// The required version is not a semantic version.
    #[error("Invalid required version '{version}': {source}")]
    InvalidVersion {
        /// The rejected version string.
        version: String,
        /// Parse failure.
        #[source]
        source: semver::Error,
    },

    /// The installed version could not be determined.
    #[error("Version probe failed for {}: {source}", .path.display())]
    ProbeFailed {
        /// Executable that was probed.
        path: PathBuf,
        /// Why the probe failed.
        #[source]
        source: ProbeError,
    },

    /// The download failed at the transport level.
    #[error("Network error downloading {url}: {source}")]
    Network {
        /// URL being fetched.
        url: String,
        /// Transport failure.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status} when downloading {url}")]
    HttpStatus {
        /// URL being fetched.
        url: String,
        /// Status code returned.
        status: u16,
    },

    /// The download did not finish within its timeout.
    #[error("Download of {url} timed out after {duration:?}")]
    Timeout {
        /// URL being fetched.
        url: String,
        /// Configured timeout.
        duration: Duration,
    },

    /// A local read or write failed.
    #[error("Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        /// Path being accessed.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The archive could not be read.
    #[error("Failed to extract archive at {}: {source}", .archive.display())]
    Extraction {
        /// Archive being extracted.
        archive: PathBuf,
        /// Decoder failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An archive entry would be written outside the target directory.
    #[error("Illegal path in archive: {entry}")]
    PathTraversal {
        /// Entry name as stored in the archive.
        entry: String,
    },

    /// An archive entry is a link or another type that is not extracted.
    #[error("Unsupported archive entry '{entry}' ({kind})")]
    UnsupportedEntry {
        /// Entry name as stored in the archive.
        entry: String,
        /// Entry type description.
        kind: String,
    },

    /// The archive was extracted but the executable is not where expected.
    #[error("Verification failed: {} not found after extraction", .path.display())]
    VerificationFailed {
        /// Expected executable path.
        path: PathBuf,
    },
}

impl InstallError {
    /// Get an actionable suggestion for fixing this error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pglet_bootstrap::InstallError;
    ///
    /// let error = InstallError::HttpStatus {
    ///     url: "https://example.com/pglet.tar.gz".to_string(),
    ///     status: 404,
    /// };
    /// assert!(error.fix_suggestion().contains("version"));
    /// ```
    pub fn fix_suggestion(&self) -> &'static str {
        match self {
            Self::Environment { .. } => {
                "Make sure the home directory exists and is writable, or set an explicit install directory"
            }
            Self::UnsupportedPlatform { .. } => {
                "Build pglet from source and put it on PATH to skip the download"
            }
            Self::InvalidVersion { .. } => "Use a semantic version such as 0.2.2",
            Self::ProbeFailed { .. } => {
                "Delete the installed executable so it is downloaded again"
            }
            Self::Network { .. } => "Check your internet connection and try again",
            Self::HttpStatus { .. } => {
                "Check that a release exists for this version and platform"
            }
            Self::Timeout { .. } => {
                "Try again on a faster connection or raise the download timeout"
            }
            Self::Filesystem { .. } => "Check disk space and permissions of the install directory",
            Self::Extraction { .. } | Self::PathTraversal { .. } | Self::UnsupportedEntry { .. } => {
                "The downloaded archive is damaged or malformed; try again or report the release"
            }
            Self::VerificationFailed { .. } => {
                "The release archive does not contain the executable; report the release"
            }
        }
    }

    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn extraction(
        archive: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Extraction {
            archive: archive.into(),
            source: source.into(),
        }
    }
}

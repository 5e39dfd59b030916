//! Install orchestration.
//!
//! This module provides [`Installer`], which decides whether pglet has to be
//! downloaded and drives the download and extraction when it does.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::download::download;
use super::InstallProgress;
use crate::archive;
use crate::detection::{find_executable, probe_version};
use crate::options::default_install_dir;
use crate::platform::executable_name_for;
use crate::{
    InstallError, InstallOptions, InstallSource, InstallTarget, Installation, InstalledState,
    Platform, EXECUTABLE_BASE_NAME,
};

/// Ensures the pinned pglet executable is available.
///
/// Every call re-inspects the search path and the install directory; nothing
/// is cached between calls.
///
/// # Example
///
/// ```rust,no_run
/// use pglet_bootstrap::{InstallOptions, Installer};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let installer = Installer::new(InstallOptions::default());
///     match installer.ensure_installed().await {
///         Ok(installation) => println!("pglet at {}", installation.path.display()),
///         Err(e) => {
///             eprintln!("{e}\nTo fix: {}", e.fix_suggestion());
///             std::process::exit(1);
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Installer {
    options: InstallOptions,
}

impl Installer {
    /// Create an installer with the given options.
    pub fn new(options: InstallOptions) -> Self {
        Self { options }
    }

    /// Options this installer was created with.
    pub fn options(&self) -> &InstallOptions {
        &self.options
    }

    /// Ensure pglet is installed, without progress reporting.
    pub async fn ensure_installed(&self) -> Result<Installation, InstallError> {
        self.ensure_installed_with_progress(|_| {}).await
    }

    /// Ensure pglet is installed, reporting each stage to `on_progress`.
    ///
    /// 1. An executable found on the search path is returned as is, without
    ///    a version check, even when the host platform has no release.
    /// 2. The private install directory is resolved and created.
    /// 3. An executable already in that directory is probed; a failed probe
    ///    counts as "not installed".
    /// 4. If it reports the required version it is returned.
    /// 5. Otherwise the release archive is downloaded to a temporary
    ///    directory and extracted into the install directory.
    ///
    /// No step is retried. Any error ends the call.
    pub async fn ensure_installed_with_progress<F>(
        &self,
        on_progress: F,
    ) -> Result<Installation, InstallError>
    where
        F: Fn(InstallProgress) + Send + Sync,
    {
        self.run(on_progress, Platform::current).await
    }

    /// Install flow with the host classification injected.
    async fn run<F, H>(&self, on_progress: F, host_platform: H) -> Result<Installation, InstallError>
    where
        F: Fn(InstallProgress) + Send + Sync,
        H: FnOnce() -> Result<Platform, InstallError>,
    {
        let options = &self.options;
        on_progress(InstallProgress::Started {
            version: options.version.clone(),
        });

        // Development override: whatever is on the search path wins, also on
        // hosts without a release.
        let executable_name = executable_name_for(options.platform, EXECUTABLE_BASE_NAME);
        if let Some(path) = find_executable(&executable_name, options.search_path.as_deref()) {
            info!(path = %path.display(), "using pglet from search path");
            return Ok(complete(&on_progress, path, None, InstallSource::SearchPath));
        }

        let platform = match options.platform {
            Some(platform) => platform,
            None => host_platform()?,
        };

        let install_dir = resolve_install_dir(options.install_dir.as_deref())?;
        let target = InstallTarget::new(options.version.as_str(), platform, install_dir)?;

        let executable_path = target.executable_path();
        if executable_path.is_file() {
            on_progress(InstallProgress::Probing {
                path: executable_path.clone(),
            });
        }
        let state = InstalledState::inspect(&target, options.probe_timeout).await;
        debug!(
            required = target.required_version(),
            installed = ?state.detected_version,
            "compared installed version"
        );

        if state.satisfies(target.required_version()) {
            return Ok(complete(
                &on_progress,
                executable_path,
                state.detected_version,
                InstallSource::Existing,
            ));
        }

        let version = self.install(&target, &on_progress).await?;
        Ok(complete(
            &on_progress,
            executable_path,
            version,
            InstallSource::Downloaded,
        ))
    }

    /// Download and extract the release for `target`.
    ///
    /// Returns the version the new executable reports, if the probe succeeds.
    async fn install<F>(
        &self,
        target: &InstallTarget,
        on_progress: &F,
    ) -> Result<Option<String>, InstallError>
    where
        F: Fn(InstallProgress) + Send + Sync,
    {
        let url = target.download_url(&self.options.base_url);
        let scratch = tempfile::tempdir()
            .map_err(|e| InstallError::filesystem(std::env::temp_dir(), e))?;
        let archive_path = scratch.path().join(target.archive_name());

        on_progress(InstallProgress::Downloading { url: url.clone() });
        info!(url = %url, "downloading pglet {}", target.required_version());
        download(&archive_path, &url, self.options.download_timeout).await?;

        // A stale or half-written executable must not survive a failed extraction.
        let executable_path = target.executable_path();
        remove_if_present(&executable_path)?;

        on_progress(InstallProgress::Extracting {
            archive: archive_path.clone(),
            destination: target.install_dir().to_path_buf(),
        });
        let kind = target.platform().archive_kind();
        let install_dir = target.install_dir().to_path_buf();
        let written = tokio::task::spawn_blocking(move || {
            archive::extract(kind, &archive_path, &install_dir)
        })
        .await
        .map_err(|e| InstallError::extraction(target.install_dir(), e))??;
        debug!(entries = written.len(), "extracted release archive");

        on_progress(InstallProgress::Verifying {
            path: executable_path.clone(),
        });
        if !executable_path.is_file() {
            return Err(InstallError::VerificationFailed {
                path: executable_path,
            });
        }
        archive::set_mode(&executable_path, 0o755)?;

        let version = match probe_version(&executable_path, self.options.probe_timeout).await {
            Ok(version) => {
                if version != target.required_version() {
                    warn!(
                        required = target.required_version(),
                        reported = %version,
                        "installed pglet reports a different version"
                    );
                }
                Some(version)
            }
            Err(e) => {
                warn!(error = %e, "could not probe freshly installed pglet");
                None
            }
        };

        info!(path = %executable_path.display(), "pglet installed");
        Ok(version)
    }
}

fn complete<F>(
    on_progress: &F,
    path: PathBuf,
    version: Option<String>,
    source: InstallSource,
) -> Installation
where
    F: Fn(InstallProgress),
{
    on_progress(InstallProgress::Completed {
        path: path.clone(),
        source,
    });
    Installation {
        path,
        version,
        source,
    }
}

fn resolve_install_dir(configured: Option<&Path>) -> Result<PathBuf, InstallError> {
    let dir = match configured {
        Some(dir) => dir.to_path_buf(),
        None => default_install_dir().ok_or_else(|| InstallError::Environment {
            message: "cannot determine the home directory".to_string(),
            source: None,
        })?,
    };

    std::fs::create_dir_all(&dir).map_err(|e| InstallError::Environment {
        message: format!("cannot create install directory {}", dir.display()),
        source: Some(e),
    })?;
    Ok(dir)
}

fn remove_if_present(path: &Path) -> Result<(), InstallError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(InstallError::filesystem(path, e)),
    }
}

/// Ensure pglet is installed using [`InstallOptions::default`].
pub async fn ensure_installed() -> Result<Installation, InstallError> {
    Installer::default().ensure_installed().await
}

/// Blocking variant of [`Installer::ensure_installed`].
///
/// Runs the install on a private current-thread runtime and blocks the
/// calling thread until it finishes. Must not be called from within an
/// async runtime.
///
/// # Example
///
/// ```rust,no_run
/// use pglet_bootstrap::{ensure_installed_blocking, InstallOptions};
///
/// let installation = match ensure_installed_blocking(InstallOptions::default()) {
///     Ok(installation) => installation,
///     Err(e) => {
///         eprintln!("{e}");
///         std::process::exit(1);
///     }
/// };
/// println!("pglet at {}", installation.path.display());
/// ```
pub fn ensure_installed_blocking(options: InstallOptions) -> Result<Installation, InstallError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| InstallError::Environment {
            message: "cannot start the install runtime".to_string(),
            source: Some(e),
        })?;
    runtime.block_on(Installer::new(options).ensure_installed())
}

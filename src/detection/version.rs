//! Version probe with timeout.

use crate::{InstallError, ProbeError};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Read the version an executable reports.
///
/// Runs `<path> --version`, captures stdout and stderr, and returns their
/// concatenation (stdout first) with surrounding whitespace removed. The run
/// is bounded by `probe_timeout`; the child is killed if it overruns.
///
/// Every failure is returned as [`InstallError::ProbeFailed`] wrapping a
/// [`ProbeError`]:
/// - `Spawn` if the executable is missing or cannot be run
/// - `Timeout` if it does not exit in time
/// - `ExitStatus` for a non-zero exit
/// - `EmptyOutput` if it printed nothing
///
/// # Example
///
/// ```rust,no_run
/// use pglet_bootstrap::probe_version;
/// use std::time::Duration;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let path = std::path::Path::new("/home/me/.pglet/bin/pglet");
///     match probe_version(path, Duration::from_secs(5)).await {
///         Ok(version) => println!("installed: {version}"),
///         Err(e) => println!("unknown: {e}"),
///     }
/// }
/// ```
pub async fn probe_version(path: &Path, probe_timeout: Duration) -> Result<String, InstallError> {
    let failed = |source| InstallError::ProbeFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut command = Command::new(path);
    command
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = timeout(probe_timeout, command.output())
        .await
        .map_err(|_| failed(ProbeError::Timeout(probe_timeout)))?
        .map_err(|e| failed(ProbeError::Spawn(e)))?;

    let mut combined = output.stdout;
    combined.extend_from_slice(&output.stderr);
    let text = String::from_utf8_lossy(&combined).trim().to_string();

    if !output.status.success() {
        return Err(failed(ProbeError::ExitStatus {
            code: output.status.code(),
            output: text,
        }));
    }
    if text.is_empty() {
        return Err(failed(ProbeError::EmptyOutput));
    }

    debug!(path = %path.display(), version = %text, "probed version");
    Ok(text)
}

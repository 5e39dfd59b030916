//! Streaming archive download.

use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::InstallError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("pglet-bootstrap/", env!("CARGO_PKG_VERSION"));

/// Download `url` into a new file at `destination`.
///
/// Any existing file at `destination` is truncated and overwritten. The
/// response status is checked before the file is created, so an error page
/// is never written as if it were the archive.
///
/// The whole transfer is bounded by `download_timeout`, with a separate
/// 30 second limit on establishing the connection.
///
/// # Returns
///
/// The number of bytes written, or:
/// - `HttpStatus` for a non-success status
/// - `Timeout` if connecting or the transfer exceeded its limit; the error
///   carries the limit that was hit
/// - `Network` for other transport failures
/// - `Filesystem` if the file cannot be created or written
///
/// A failed call may leave a partial file behind; it must not be treated as
/// a valid download.
pub async fn download(
    destination: &Path,
    url: &str,
    download_timeout: Duration,
) -> Result<u64, InstallError> {
    let transport = |source: reqwest::Error| {
        if source.is_timeout() {
            InstallError::Timeout {
                url: url.to_string(),
                duration: timeout_limit(source.is_connect(), download_timeout),
            }
        } else {
            InstallError::Network {
                url: url.to_string(),
                source,
            }
        }
    };

    let client = reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(download_timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(transport)?;

    let mut response = client.get(url).send().await.map_err(transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(InstallError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let mut file = File::create(destination)
        .await
        .map_err(|e| InstallError::filesystem(destination, e))?;

    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await.map_err(transport)? {
        file.write_all(&chunk)
            .await
            .map_err(|e| InstallError::filesystem(destination, e))?;
        written += chunk.len() as u64;
    }
    file.flush()
        .await
        .map_err(|e| InstallError::filesystem(destination, e))?;

    debug!(url, bytes = written, destination = %destination.display(), "download finished");
    Ok(written)
}

fn timeout_limit(connecting: bool, download_timeout: Duration) -> Duration {
    if connecting {
        CONNECT_TIMEOUT.min(download_timeout)
    } else {
        download_timeout
    }
}

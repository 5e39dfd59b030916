//! # pglet-bootstrap
//!
//! Makes sure the pinned `pglet` executable is available before a client
//! library talks to it.
//!
//! The installer first looks for `pglet` on the search path (a locally built
//! executable always wins). Otherwise it checks the private install directory
//! `~/.pglet/bin`, and when the executable there is missing or reports a
//! different version it downloads the release archive for the host platform
//! and extracts it in place.
//!
//! ## Features
//!
//! - `Installer` with `ensure_installed()` and progress reporting
//! - `ensure_installed_blocking()` for synchronous callers
//! - `probe_version()`, `download()`, `extract_tar()` and `extract_zip()` as
//!   standalone building blocks
//! - `InstallError` with an actionable `fix_suggestion()` for every failure
//!
//! ## Example
//!
//! ```rust,no_run
//! use pglet_bootstrap::{ensure_installed_blocking, InstallOptions};
//!
//! fn main() {
//!     match ensure_installed_blocking(InstallOptions::default()) {
//!         Ok(installation) => println!("pglet at {}", installation.path.display()),
//!         Err(e) => {
//!             eprintln!("{}", e);
//!             std::process::exit(1);
//!         }
//!     }
//! }
//! ```

mod archive;
mod detection;
mod install;
mod options;
mod platform;
mod target;

pub use archive::{extract, extract_tar, extract_zip};
pub use detection::probe_version;
pub use install::{
    download, ensure_installed, ensure_installed_blocking, InstallError, InstallProgress,
    Installer, ProbeError,
};
pub use options::{default_install_dir, InstallOptions, DEFAULT_BASE_URL, PGLET_VERSION};
pub use platform::{Arch, ArchiveKind, Os, Platform};
pub use target::{
    InstallSource, InstallTarget, Installation, InstalledState, EXECUTABLE_BASE_NAME,
};

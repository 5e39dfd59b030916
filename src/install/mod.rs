//! Installation of the pglet executable.
//!
//! [`Installer`] resolves a usable executable, downloading and extracting a
//! release when the private install directory does not already hold the
//! required version.
//!
//! # Example
//!
//! ```rust,no_run
//! use pglet_bootstrap::{InstallOptions, InstallProgress, Installer};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let installer = Installer::new(InstallOptions::default());
//!     let result = installer
//!         .ensure_installed_with_progress(|progress| println!("{}", progress.stage()))
//!         .await;
//!
//!     match result {
//!         Ok(installation) => println!("Ready: {}", installation.path.display()),
//!         Err(e) => println!("Failed: {}. Fix: {}", e, e.fix_suggestion()),
//!     }
//! }
//! ```

mod download;
mod errors;
mod executor;
mod progress;

pub use download::download;
pub use errors::{InstallError, ProbeError};
pub use executor::{ensure_installed, ensure_installed_blocking, Installer};
pub use progress::InstallProgress;

//! Detection of existing executables.
//!
//! - `find_executable`: search-path lookup for the development override
//! - `probe_version`: `--version` probe with a timeout

mod path_finder;
mod version;

pub(crate) use path_finder::find_executable;
pub use version::probe_version;

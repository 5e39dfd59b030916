//! Platform classification for release downloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::IntoEnumIterator;

use crate::InstallError;

/// Operating system family a pglet release is published for.
///
/// # Example
///
/// ```rust
/// use pglet_bootstrap::Os;
///
/// assert_eq!(Os::MacOs.release_tag(), "darwin");
/// assert!(Os::Windows.is_windows());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
#[non_exhaustive]
pub enum Os {
    /// Linux distributions.
    Linux,
    /// Apple macOS.
    MacOs,
    /// Microsoft Windows.
    Windows,
}

impl Os {
    /// Tag used for this OS in release archive names.
    pub fn release_tag(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "darwin",
            Self::Windows => "windows",
        }
    }

    /// Whether this OS belongs to the Windows family.
    ///
    /// The Windows family is the only one whose executables carry the `.exe`
    /// suffix and whose releases are shipped as zip archives.
    pub fn is_windows(&self) -> bool {
        matches!(self, Self::Windows)
    }

    fn from_consts(os: &str) -> Option<Self> {
        match os {
            "linux" => Some(Self::Linux),
            "macos" => Some(Self::MacOs),
            "windows" => Some(Self::Windows),
            _ => None,
        }
    }
}

/// CPU architecture a pglet release is published for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
#[non_exhaustive]
pub enum Arch {
    /// 64-bit x86.
    Amd64,
    /// 64-bit ARM.
    Arm64,
    /// 32-bit ARM.
    Arm,
    /// 32-bit x86.
    X86,
}

impl Arch {
    /// Tag used for this architecture in release archive names.
    pub fn release_tag(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
            Self::Arm => "arm",
            Self::X86 => "386",
        }
    }

    fn from_consts(arch: &str) -> Option<Self> {
        match arch {
            "x86_64" => Some(Self::Amd64),
            "aarch64" => Some(Self::Arm64),
            "arm" => Some(Self::Arm),
            "x86" => Some(Self::X86),
            _ => None,
        }
    }
}

/// Archive format a release is packaged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchiveKind {
    /// Gzip-compressed tar archive (`.tar.gz`).
    TarGz,
    /// Zip archive (`.zip`).
    Zip,
}

impl ArchiveKind {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
        }
    }
}

/// An OS and architecture pair.
///
/// # Example
///
/// ```rust
/// use pglet_bootstrap::{Arch, ArchiveKind, Os, Platform};
///
/// let platform = Platform::new(Os::Windows, Arch::Amd64);
/// assert_eq!(platform.executable_name("pglet"), "pglet.exe");
/// assert_eq!(platform.archive_kind(), ArchiveKind::Zip);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    /// Operating system family.
    pub os: Os,
    /// CPU architecture.
    pub arch: Arch,
}

impl Platform {
    /// Create a platform from its parts.
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Classify the platform this process was compiled for.
    ///
    /// Returns [`InstallError::UnsupportedPlatform`] when no pglet release
    /// exists for the host OS or architecture.
    pub fn current() -> Result<Self, InstallError> {
        Self::from_consts(std::env::consts::OS, std::env::consts::ARCH)
    }

    pub(crate) fn from_consts(os: &str, arch: &str) -> Result<Self, InstallError> {
        match (Os::from_consts(os), Arch::from_consts(arch)) {
            (Some(os), Some(arch)) => Ok(Self { os, arch }),
            _ => Err(InstallError::UnsupportedPlatform {
                os: os.to_string(),
                arch: arch.to_string(),
            }),
        }
    }

    /// Every OS and architecture combination.
    pub fn all() -> impl Iterator<Item = Self> {
        Os::iter().flat_map(|os| Arch::iter().map(move |arch| Self { os, arch }))
    }

    /// Executable file name for `base` on this platform.
    pub fn executable_name(&self, base: &str) -> String {
        executable_name_for(Some(*self), base)
    }

    /// Archive format releases for this platform are shipped in.
    pub fn archive_kind(&self) -> ArchiveKind {
        if self.os.is_windows() {
            ArchiveKind::Zip
        } else {
            ArchiveKind::TarGz
        }
    }
}

/// Executable file name for `base` on `platform`, or on the compile-time
/// host when no platform is given.
///
/// Unlike [`Platform::current`] this never fails, so it also works on hosts
/// that have no pglet release.
pub(crate) fn executable_name_for(platform: Option<Platform>, base: &str) -> String {
    if platform.map_or(cfg!(windows), |platform| platform.os.is_windows()) {
        format!("{base}.exe")
    } else {
        base.to_string()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.release_tag(), self.arch.release_tag())
    }
}

//! Host platform detection and the executable lookup table.
//!
//! The mapping is closed: every [`Platform`] either resolves through
//! [`EXECUTABLES`] or is `Unsupported`, so there is no string chain to fall
//! through.

use std::fmt;
use std::path::{Path, PathBuf};

/// Directory, relative to the launcher root, that holds the game binaries.
pub const GAME_DIR: &str = "src";

/// Operating system the launcher is running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
    /// Anything else, carrying the raw OS name for the error message.
    Unsupported(String),
}

/// How a platform invokes and builds the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Windows,
    Unix,
}

/// One row per family: the executable name inside [`GAME_DIR`].
const EXECUTABLES: &[(PlatformFamily, &str)] = &[
    (PlatformFamily::Windows, "BinaryGame.exe"),
    (PlatformFamily::Unix, "BinaryQuestGUI"),
];

impl Platform {
    /// Detects the platform of the running process.
    pub fn detect() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Maps an OS identity string (`std::env::consts::OS` style, or the
    /// `uname`-style `Darwin`) to a platform. Case-insensitive.
    pub fn from_os_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            "macos" | "darwin" => Platform::MacOs,
            _ => Platform::Unsupported(name.to_string()),
        }
    }

    pub fn family(&self) -> Option<PlatformFamily> {
        match self {
            Platform::Windows => Some(PlatformFamily::Windows),
            Platform::Linux | Platform::MacOs => Some(PlatformFamily::Unix),
            Platform::Unsupported(_) => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => f.write_str("Windows"),
            Platform::Linux => f.write_str("Linux"),
            Platform::MacOs => f.write_str("macOS"),
            Platform::Unsupported(name) => f.write_str(name),
        }
    }
}

impl PlatformFamily {
    /// Remediation lines shown when the executable has not been built yet.
    pub fn build_instructions(self) -> &'static [&'static str] {
        match self {
            PlatformFamily::Windows => &[
                "  1. Open Visual Studio or MinGW",
                "  2. Build the Windows version",
            ],
            PlatformFamily::Unix => &["  cd src", "  make gui"],
        }
    }

    /// Whether the executable needs its mode bits fixed before launch.
    pub fn needs_exec_bit(self) -> bool {
        matches!(self, PlatformFamily::Unix)
    }
}

/// The game executable resolved for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableDescriptor {
    family: PlatformFamily,
    path: PathBuf,
    name: &'static str,
}

impl ExecutableDescriptor {
    /// Looks the platform up in the executable table. `None` for unsupported
    /// platforms.
    pub fn for_platform(platform: &Platform) -> Option<Self> {
        let family = platform.family()?;
        EXECUTABLES
            .iter()
            .find(|(f, _)| *f == family)
            .map(|&(family, name)| ExecutableDescriptor {
                family,
                path: Path::new(GAME_DIR).join(name),
                name,
            })
    }

    /// Path relative to the launcher root, e.g. `src/BinaryQuestGUI`.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn family(&self) -> PlatformFamily {
        self.family
    }

    /// Program to spawn once the working directory is [`GAME_DIR`]: the bare
    /// name on Windows, `./name` on Unix.
    pub fn invocation(&self) -> PathBuf {
        match self.family {
            PlatformFamily::Windows => PathBuf::from(self.name),
            PlatformFamily::Unix => Path::new(".").join(self.name),
        }
    }
}

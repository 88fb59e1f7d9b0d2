use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for every step of a launch.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The host OS has no entry in the executable table.
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// The platform executable is missing from the game directory.
    #[error("{name} not found!")]
    NotFound { name: String, path: PathBuf },

    /// Capturing the current working directory, or entering the game
    /// directory, failed.
    #[error("cannot switch working directory to '{}': {source}", path.display())]
    WorkDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OS refused to start the game executable.
    #[error("failed to start '{}': {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the running game failed.
    #[error("failed to wait for the game process: {0}")]
    Wait(#[source] std::io::Error),

    /// The interrupt handler could not be installed.
    #[error("failed to install interrupt handler: {0}")]
    Signal(#[source] std::io::Error),
}

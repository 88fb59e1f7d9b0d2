use std::path::PathBuf;

use crate::platform::GAME_DIR;

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "BINARY_QUEST_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings for one launch. None of these come from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Directory the game directory is resolved against.
    pub root: PathBuf,
    /// Clear the terminal before printing the banner.
    pub clear_screen: bool,
}

impl LauncherConfig {
    /// Config for the binary: the working directory as root, and screen
    /// clearing only when stdout is attached to a terminal.
    pub fn from_env() -> Self {
        Self {
            clear_screen: stdout_is_terminal(),
            ..Self::default()
        }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// The game directory, joined onto the root.
    pub fn game_dir_path(&self) -> PathBuf {
        self.root.join(GAME_DIR)
    }
}

/// Only stdout counts: `dimensions()` would also accept a terminal on stdin
/// or stderr and put the clear sequence into redirected output.
fn stdout_is_terminal() -> bool {
    term_size::dimensions_stdout().is_some()
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            clear_screen: false,
        }
    }
}

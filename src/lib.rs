//! # Binary Quest Launcher
//!
//! Finds the prebuilt Binary Quest executable for the host OS, checks that
//! it has been built, makes it executable on Unix, and runs it from the
//! `src/` directory until it exits or the player interrupts it.
//!
//! ## Key Modules
//!
//! - [`platform`]: OS detection and the executable lookup table.
//! - [`launcher`]: the launch sequence and its [`LaunchOutcome`].
//! - [`process`]: spawning and waiting on the game, behind [`process::ProcessHost`].
//! - [`fsx`]: permission bits and the scoped working directory.
//!
//! ## Examples
//!
//! ```no_run
//! use binary_quest_launcher::{LauncherConfig, Launcher};
//!
//! let outcome = Launcher::for_host(LauncherConfig::from_env()).run();
//! std::process::exit(outcome.exit_code().into());
//! ```

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod platform;
pub mod process;

// Cross-platform filesystem wrapper
pub mod fsx;

pub use config::LauncherConfig;
pub use error::LaunchError;
pub use launcher::{LaunchOutcome, Launcher};
pub use platform::{ExecutableDescriptor, Platform, PlatformFamily};

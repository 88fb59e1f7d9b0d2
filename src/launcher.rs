//! The launch sequence: resolve the platform executable, check it exists,
//! fix its permissions, run it from the game directory and report how it went.

use std::io::Write;

use tracing::{debug, info, warn};

use crate::config::LauncherConfig;
use crate::console::Console;
use crate::error::LaunchError;
use crate::fsx;
use crate::platform::{ExecutableDescriptor, Platform};
use crate::process::{ChildExit, ProcessHost, SystemHost};

/// Terminal result of a launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The game ran and exited, whatever its own exit code.
    Success,
    /// The platform executable is missing.
    NotFound(String),
    /// No executable is known for this OS. Carries the raw OS name.
    UnsupportedPlatform(String),
    /// The operator interrupted the game. Not a failure.
    InterruptedByUser,
    /// Spawning or waiting on the game failed.
    RuntimeFailure(String),
}

impl LaunchOutcome {
    /// Exit status for the launcher process.
    pub fn exit_code(&self) -> u8 {
        match self {
            LaunchOutcome::Success | LaunchOutcome::InterruptedByUser => 0,
            LaunchOutcome::NotFound(_)
            | LaunchOutcome::UnsupportedPlatform(_)
            | LaunchOutcome::RuntimeFailure(_) => 1,
        }
    }
}

pub struct Launcher<H: ProcessHost, W: Write> {
    config: LauncherConfig,
    platform: Platform,
    host: H,
    console: Console<W>,
}

impl Launcher<SystemHost, std::io::Stdout> {
    /// Launcher for the running host, printing to stdout.
    pub fn for_host(config: LauncherConfig) -> Self {
        Launcher::new(config, Platform::detect(), SystemHost, std::io::stdout())
    }
}

impl<H: ProcessHost, W: Write> Launcher<H, W> {
    pub fn new(config: LauncherConfig, platform: Platform, host: H, out: W) -> Self {
        Self {
            config,
            platform,
            host,
            console: Console::new(out),
        }
    }

    /// Runs the whole launch sequence once.
    pub fn run(&mut self) -> LaunchOutcome {
        if self.config.clear_screen {
            self.console.clear_screen();
        }
        self.console.banner();

        let desc = match self.resolve() {
            Ok(desc) => desc,
            Err(e) => {
                self.console.error(&e.to_string());
                return LaunchOutcome::UnsupportedPlatform(self.platform.to_string());
            }
        };

        if let Err(e) = self.locate(&desc) {
            if let LaunchError::NotFound { path, .. } = &e {
                warn!(path = %path.display(), "game executable missing");
            }
            self.console.error(&e.to_string());
            self.console.build_instructions(desc.family());
            return LaunchOutcome::NotFound(desc.name().to_string());
        }

        self.prepare(&desc);

        self.console.starting(desc.name());
        match self.spawn_and_wait(&desc) {
            Ok(ChildExit::Exited(code)) => {
                info!(?code, "game finished");
            }
            Ok(ChildExit::Interrupted) => {
                warn!("game interrupted by user");
                self.console.interrupted();
                self.console.closing();
                return LaunchOutcome::InterruptedByUser;
            }
            Err(e) => {
                self.console.run_failure(&e.to_string());
                return LaunchOutcome::RuntimeFailure(e.to_string());
            }
        }

        self.console.closing();
        LaunchOutcome::Success
    }

    /// Consumes the launcher and hands back the output sink.
    pub fn into_output(self) -> W {
        self.console.into_inner()
    }

    fn resolve(&self) -> Result<ExecutableDescriptor, LaunchError> {
        let desc = ExecutableDescriptor::for_platform(&self.platform)
            .ok_or_else(|| LaunchError::UnsupportedPlatform(self.platform.to_string()))?;
        debug!(platform = %self.platform, executable = desc.name(), "resolved executable");
        Ok(desc)
    }

    fn locate(&self, desc: &ExecutableDescriptor) -> Result<(), LaunchError> {
        let path = self.config.root.join(desc.path());
        if !path.exists() {
            return Err(LaunchError::NotFound {
                name: desc.name().to_string(),
                path,
            });
        }
        Ok(())
    }

    fn prepare(&mut self, desc: &ExecutableDescriptor) {
        if !desc.family().needs_exec_bit() {
            return;
        }
        let path = self.config.root.join(desc.path());
        if let Err(e) = self.host.prepare(&path) {
            debug!(path = %path.display(), error = %e, "could not set executable permissions");
        }
    }

    fn spawn_and_wait(&mut self, desc: &ExecutableDescriptor) -> Result<ChildExit, LaunchError> {
        let game_dir = self.config.game_dir_path();
        let program = desc.invocation();
        let host = &mut self.host;
        fsx::with_current_dir(&game_dir, || host.run(&program))
            .map_err(|source| LaunchError::WorkDir { path: game_dir.clone(), source })?
    }
}

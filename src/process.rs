//! Spawning and waiting on the game process.
//!
//! [`ProcessHost`] is the seam between the launcher's control flow and the
//! OS. [`SystemHost`] is the real implementation; tests swap in a fake.

use std::io;
use std::path::Path;
use std::process::{Child, Command, ExitStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use signal_hook::consts::SIGINT;
use tracing::{debug, info, warn};

use crate::error::LaunchError;
use crate::fsx;

/// How often the wait checks for child exit and interrupts.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Time a game gets to quit on its own after Ctrl+C before it is killed.
pub const INTERRUPT_GRACE: Duration = Duration::from_millis(250);

/// How the blocking wait on the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    /// The game exited on its own. `None` when it was killed by a signal
    /// other than an interrupt.
    Exited(Option<i32>),
    /// The operator interrupted the wait (Ctrl+C).
    Interrupted,
}

pub trait ProcessHost {
    /// Makes the executable runnable. Only called on Unix-family platforms.
    fn prepare(&mut self, path: &Path) -> io::Result<()> {
        fsx::set_unix_permissions(path, fsx::EXECUTABLE_MODE)
    }

    /// Spawns `program` with no arguments from the current working directory
    /// and blocks until it finishes.
    fn run(&mut self, program: &Path) -> Result<ChildExit, LaunchError>;
}

/// Runs the game as a real child process with inherited stdio.
#[derive(Debug, Default)]
pub struct SystemHost;

impl ProcessHost for SystemHost {
    fn run(&mut self, program: &Path) -> Result<ChildExit, LaunchError> {
        // SIGINT reaches the whole foreground group. Catch it for the length
        // of the wait so the launcher outlives the game and can report it.
        let interrupted = Arc::new(AtomicBool::new(false));
        let sig_id = signal_hook::flag::register(SIGINT, Arc::clone(&interrupted))
            .map_err(LaunchError::Signal)?;
        let _unregister = scopeguard::guard(sig_id, |id| {
            signal_hook::low_level::unregister(id);
        });

        let program = resolve_program(program);
        debug!(program = %program.display(), "spawning game");
        let mut child = Command::new(&program)
            .spawn()
            .map_err(|source| LaunchError::Spawn { program: program.clone(), source })?;

        wait_or_interrupt(&mut child, &interrupted, INTERRUPT_GRACE)
    }
}

/// Blocks until `child` exits or `interrupted` is raised.
///
/// After an interrupt the child gets `grace` to exit by itself, then it is
/// killed and reaped. Games that trap or ignore SIGINT cannot hold the
/// launcher.
pub fn wait_or_interrupt(
    child: &mut Child,
    interrupted: &AtomicBool,
    grace: Duration,
) -> Result<ChildExit, LaunchError> {
    let status = loop {
        if let Some(status) = child.try_wait().map_err(LaunchError::Wait)? {
            break status;
        }
        if interrupted.load(Ordering::SeqCst) {
            stop_after_interrupt(child, grace)?;
            return Ok(ChildExit::Interrupted);
        }
        thread::sleep(POLL_INTERVAL);
    };
    info!(%status, "game exited");

    if interrupted.load(Ordering::SeqCst) || killed_by_interrupt(&status) {
        return Ok(ChildExit::Interrupted);
    }
    Ok(ChildExit::Exited(status.code()))
}

fn stop_after_interrupt(child: &mut Child, grace: Duration) -> Result<(), LaunchError> {
    let deadline = Instant::now() + grace;
    while Instant::now() < deadline {
        if let Some(status) = child.try_wait().map_err(LaunchError::Wait)? {
            info!(%status, "game exited after interrupt");
            return Ok(());
        }
        thread::sleep(POLL_INTERVAL.min(grace));
    }

    warn!(pid = child.id(), "game still running after interrupt, killing it");
    // Fails only if the child exited in the meantime; the wait below reaps it
    // either way.
    if let Err(e) = child.kill() {
        debug!(error = %e, "kill after interrupt failed");
    }
    let status = child.wait().map_err(LaunchError::Wait)?;
    info!(%status, "game stopped after interrupt");
    Ok(())
}

// std no longer searches the current directory for bare program names on
// Windows, so anchor the bare name to it explicitly.
#[cfg(windows)]
fn resolve_program(program: &Path) -> std::path::PathBuf {
    if program.components().count() == 1 {
        Path::new(".").join(program)
    } else {
        program.to_path_buf()
    }
}

#[cfg(not(windows))]
fn resolve_program(program: &Path) -> std::path::PathBuf {
    program.to_path_buf()
}

#[cfg(unix)]
fn killed_by_interrupt(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_interrupt(_status: &ExitStatus) -> bool {
    false
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn script(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn reports_child_exit_code() {
        let dir = tempdir().unwrap();
        let game = script(dir.path(), "game", "exit 7");

        let exit = SystemHost.run(&game).unwrap();

        assert_eq!(exit, ChildExit::Exited(Some(7)));
    }

    #[test]
    fn child_killed_by_sigint_counts_as_interrupt() {
        let dir = tempdir().unwrap();
        let game = script(dir.path(), "game", "kill -INT $$");

        let exit = SystemHost.run(&game).unwrap();

        assert_eq!(exit, ChildExit::Interrupted);
    }

    #[test]
    fn interrupt_kills_game_that_ignores_sigint() {
        let dir = tempdir().unwrap();
        let game = script(dir.path(), "game", "trap '' INT\nexec sleep 5");
        let mut child = Command::new(&game).spawn().unwrap();
        let interrupted = Arc::new(AtomicBool::new(false));
        let raiser = {
            let interrupted = Arc::clone(&interrupted);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(300));
                interrupted.store(true, Ordering::SeqCst);
            })
        };

        let started = Instant::now();
        let exit = wait_or_interrupt(&mut child, &interrupted, INTERRUPT_GRACE).unwrap();
        raiser.join().unwrap();

        assert_eq!(exit, ChildExit::Interrupted);
        assert!(started.elapsed() < Duration::from_secs(3), "wait outlived the interrupt");
        // Reaped: nothing left to wait on.
        assert!(child.try_wait().unwrap().is_some());
    }

    #[test]
    fn interrupt_already_raised_stops_game_after_grace() {
        let dir = tempdir().unwrap();
        let game = script(dir.path(), "game", "exec sleep 5");
        let mut child = Command::new(&game).spawn().unwrap();
        let interrupted = AtomicBool::new(true);

        let started = Instant::now();
        let exit = wait_or_interrupt(&mut child, &interrupted, Duration::from_millis(100)).unwrap();

        assert_eq!(exit, ChildExit::Interrupted);
        assert!(started.elapsed() < Duration::from_secs(3));
        assert!(child.try_wait().unwrap().is_some());
    }

    #[test]
    fn game_exiting_before_interrupt_reports_its_code() {
        let dir = tempdir().unwrap();
        let game = script(dir.path(), "game", "exit 4");
        let mut child = Command::new(&game).spawn().unwrap();
        let interrupted = AtomicBool::new(false);

        let exit = wait_or_interrupt(&mut child, &interrupted, INTERRUPT_GRACE).unwrap();

        assert_eq!(exit, ChildExit::Exited(Some(4)));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let dir = tempdir().unwrap();

        let err = SystemHost.run(&dir.path().join("absent")).unwrap_err();

        assert!(matches!(err, LaunchError::Spawn { .. }));
    }

    #[test]
    fn default_prepare_sets_exec_bits() {
        let dir = tempdir().unwrap();
        let game = dir.path().join("game");
        std::fs::write(&game, b"#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&game, std::fs::Permissions::from_mode(0o600)).unwrap();

        SystemHost.prepare(&game).unwrap();

        let mode = std::fs::metadata(&game).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}

//! Cross-platform filesystem helpers.
//!
//! On Unix, permission bits are set through `PermissionsExt`. On Windows there
//! are no POSIX modes and the call is a no-op, so call-sites stay identical
//! across OSes.

use std::io;
use std::path::Path;

use tracing::warn;

/// Mode given to the game executable: rwx for owner, r-x for group/other.
pub const EXECUTABLE_MODE: u32 = 0o755;

#[cfg(not(target_os = "windows"))]
/// Set POSIX permission bits on Unix.
pub fn set_unix_permissions(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(target_os = "windows")]
/// No-op on Windows: POSIX permission bits do not exist.
pub fn set_unix_permissions(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

/// Runs `f` with the process working directory set to `dir`.
///
/// The original directory is put back when `f` returns or unwinds. Failing to
/// read the current directory or to enter `dir` is returned before `f` runs.
pub fn with_current_dir<T>(dir: &Path, f: impl FnOnce() -> T) -> io::Result<T> {
    let original = std::env::current_dir()?;
    std::env::set_current_dir(dir)?;
    let _restore = scopeguard::guard(original, |original| {
        if let Err(e) = std::env::set_current_dir(&original) {
            warn!(dir = %original.display(), error = %e, "could not restore working directory");
        }
    });
    Ok(f())
}

/// Serializes tests that change the process working directory.
#[cfg(test)]
pub(crate) fn cwd_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn current_dir_is_restored_after_closure() {
        let _lock = cwd_lock();
        let before = std::env::current_dir().unwrap();
        let dir = tempdir().unwrap();

        let inside = with_current_dir(dir.path(), || std::env::current_dir().unwrap()).unwrap();

        assert_eq!(inside.canonicalize().unwrap(), dir.path().canonicalize().unwrap());
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn current_dir_is_restored_after_panic() {
        let _lock = cwd_lock();
        let before = std::env::current_dir().unwrap();
        let dir = tempdir().unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = with_current_dir(dir.path(), || panic!("game blew up"));
        }));

        assert!(result.is_err());
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn missing_dir_is_an_error_and_closure_is_skipped() {
        let _lock = cwd_lock();
        let before = std::env::current_dir().unwrap();
        let dir = tempdir().unwrap();
        let mut ran = false;

        let result = with_current_dir(&dir.path().join("nope"), || ran = true);

        assert!(result.is_err());
        assert!(!ran);
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn sets_executable_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let file = dir.path().join("game");
        std::fs::write(&file, b"#!/bin/sh\n").unwrap();

        set_unix_permissions(&file, EXECUTABLE_MODE).unwrap();

        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}

//! No-op implementations when profiling is disabled.
//!
//! All functions in this module are `#[inline(always)]` empty functions
//! that will be completely eliminated by the compiler.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// No-op initialization.
#[inline(always)]
pub fn init() {}

/// No-op initialization; never produces a log file.
#[inline(always)]
pub fn init_in(_: &Path) -> Option<PathBuf> {
    None
}

/// No-op shutdown.
#[inline(always)]
pub fn shutdown() {}

/// No-op event logging.
#[inline(always)]
pub fn log_event<T>(_: T) {}

/// No-op timed scope logging.
#[inline(always)]
pub fn log_timed(_: &str, _: Duration) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_never_creates_files() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(init_in(dir.path()).is_none());
        log_timed("anything", Duration::from_millis(1));
        shutdown();
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

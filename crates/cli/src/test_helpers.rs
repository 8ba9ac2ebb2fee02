//! Test helpers for unit tests
//!
//! This module provides shared utilities for unit tests within the CLI crate.
//! For integration tests, see `tests/integration_test_helpers.rs`.
//!
//! Both guards mutate process-wide state, so tests using them must be
//! marked `#[serial]`.

#[cfg(test)]
use std::ffi::OsString;
#[cfg(test)]
use std::fs;
#[cfg(test)]
use std::path::{Path, PathBuf};

/// Guard for changing the current working directory in tests.
/// Automatically restores the original directory when dropped.
#[cfg(test)]
pub struct DirGuard {
    original_dir: PathBuf,
}

#[cfg(test)]
impl DirGuard {
    /// Create a new DirGuard and change to the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory can't be created or entered, or the
    /// current directory can't be determined.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        let original_dir = std::env::current_dir()?;
        std::env::set_current_dir(path)?;
        Ok(DirGuard { original_dir })
    }
}

#[cfg(test)]
impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original_dir);
    }
}

/// Guard for setting or clearing an environment variable in tests.
/// Restores the previous value (or absence) when dropped.
#[cfg(test)]
pub struct EnvGuard {
    key: &'static str,
    previous: Option<OsString>,
}

#[cfg(test)]
impl EnvGuard {
    pub fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var_os(key);
        std::env::set_var(key, value);
        EnvGuard { key, previous }
    }

    pub fn unset(key: &'static str) -> Self {
        let previous = std::env::var_os(key);
        std::env::remove_var(key);
        EnvGuard { key, previous }
    }
}

#[cfg(test)]
impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(value) => std::env::set_var(self.key, value),
            None => std::env::remove_var(self.key),
        }
    }
}

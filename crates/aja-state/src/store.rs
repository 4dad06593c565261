//! File-backed key-value store for persisted client state.
//!
//! Each key is one JSON file under the data directory. Files are written
//! owner-only on Unix since the session file identifies the user.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StateError;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read and decode `key`. A missing or empty file is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Store`] if the file exists but cannot be read or
    /// decoded.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StateError> {
        let path = self.path_for(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(store_error(&path, &e)),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| store_error(&path, &e))
    }

    /// Encode and write `value` under `key`, creating the directory.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Store`] on I/O or encoding failure.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StateError> {
        fs::create_dir_all(&self.dir).map_err(|e| store_error(&self.dir, &e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.dir.display());
            }
        }

        let path = self.path_for(key);
        let json = serde_json::to_string_pretty(value).map_err(|e| store_error(&path, &e))?;
        fs::write(&path, json).map_err(|e| store_error(&path, &e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
                .map_err(|e| store_error(&path, &e))?;
        }
        Ok(())
    }

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Store`] if the file exists but cannot be removed.
    pub fn remove(&self, key: &str) -> Result<(), StateError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_error(&path, &e)),
        }
    }
}

fn store_error(path: &Path, error: &dyn std::fmt::Display) -> StateError {
    StateError::Store {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

//! General client configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default table page size.
const fn default_page_size() -> u32 {
    25
}

/// Default number of report history entries kept.
const fn default_history_limit() -> usize {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rows per page requested from `/table-data`.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Report history entries kept on disk, newest first.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Where the session and report history are stored. Empty means
    /// `~/.ajalabs`.
    #[serde(default)]
    pub data_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            history_limit: default_history_limit(),
            data_dir: String::new(),
        }
    }
}

impl GeneralConfig {
    /// Resolved data directory. Falls back to `./.ajalabs` when no home
    /// directory is known.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        if !self.data_dir.trim().is_empty() {
            return PathBuf::from(self.data_dir.trim());
        }
        dirs::home_dir().map_or_else(|| PathBuf::from(".ajalabs"), |home| home.join(".ajalabs"))
    }
}

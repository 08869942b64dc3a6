use crate::config::{default_file_name, default_prompt};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where and how recordings are saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Suggested file name.
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Ask for a location with a save dialog.
    #[serde(default = "default_prompt")]
    pub prompt: bool,
    /// Target directory (None = the user's Downloads folder).
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            prompt: default_prompt(),
            directory: None,
        }
    }
}

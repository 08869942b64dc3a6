//! Configuration management for webcam-recorder.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{CaptureConfig, DownloadConfig, VideoConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::{ProjectDirs, UserDirs};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use webcam_recorder_core::RecorderOptions;

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "webcam-recorder";
const APPLICATION: &str = "Webcam-Recorder";

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Capture resolution and mirroring.
    #[serde(default)]
    pub video: VideoConfig,
    /// Initial audio and camera selection.
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Save location and dialog behavior.
    #[serde(default)]
    pub download: DownloadConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            info!(config_path = ?config_path, "Configuration loaded");
            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Read and parse a config file.
    #[track_caller]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Self::parse(&contents)
    }

    /// Parse TOML; missing sections and keys take their defaults.
    ///
    /// A video size no camera can negotiate is rejected here rather than at
    /// the first stream open.
    #[track_caller]
    pub fn parse(contents: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config
            .video
            .constraints()
            .validate()
            .map_err(|e| AppError::ConfigError {
                reason: format!("Invalid [video] section: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(config)
    }

    /// Save configuration to disk using atomic write pattern.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Write to a temporary file next to `path`, then rename over it.
    #[track_caller]
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(())
    }

    /// Directory recordings are saved to without a dialog, and where the
    /// dialog starts.
    ///
    /// Falls back to the current directory when the platform has no
    /// Downloads folder.
    pub fn download_dir(&self) -> PathBuf {
        if let Some(dir) = &self.download.directory {
            return dir.clone();
        }

        UserDirs::new()
            .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Scratch directory for staged recordings.
    #[track_caller]
    pub fn staging_dir() -> AppResult<PathBuf> {
        Ok(Self::project_dirs()?.cache_dir().join("staging"))
    }

    /// Directory for rolling log files.
    #[track_caller]
    pub fn log_dir() -> AppResult<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("logs"))
    }

    /// Initial state for the recorder component.
    pub fn recorder_options(&self, staging_dir: PathBuf) -> RecorderOptions {
        RecorderOptions {
            video: self.video.constraints(),
            audio_enabled: self.capture.audio_enabled,
            facing_mode: self.capture.facing_mode,
            selector_mode: self.capture.selector_mode,
            file_name: self.download.file_name.clone(),
            staging_dir,
        }
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let config = Config::default();
        config.save()?;
        Ok(config)
    }
}

use crate::{CaptureError, CoreResult, StagedArtifact};

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{info, instrument};

/// Result of handing a recording to a [`SaveTarget`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The recording was written here.
    Saved(PathBuf),
    /// The user dismissed the save prompt.
    Cancelled,
}

/// Puts a finished recording somewhere the user can find it.
pub trait SaveTarget: Send {
    /// Save `artifact`, suggesting `file_name` to the user.
    fn save(&mut self, artifact: &StagedArtifact, file_name: &str) -> CoreResult<SaveOutcome>;
}

/// Saves straight into a directory without prompting.
///
/// Existing files are never overwritten: `name.webm` becomes
/// `name (1).webm`, `name (2).webm`, and so on.
#[derive(Debug, Clone)]
pub struct FileSaveTarget {
    directory: PathBuf,
}

impl FileSaveTarget {
    /// Save into `directory`, creating it on first use.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Target directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// First path in the directory not taken by an existing file.
    pub fn available_path(&self, file_name: &str) -> PathBuf {
        let candidate = self.directory.join(file_name);
        if !candidate.exists() {
            return candidate;
        }

        let name = Path::new(file_name);
        let stem = name
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        let extension = name.extension().map(|e| e.to_string_lossy().into_owned());

        (1u32..)
            .map(|n| {
                let numbered = match &extension {
                    Some(ext) => format!("{} ({}).{}", stem, n, ext),
                    None => format!("{} ({})", stem, n),
                };
                self.directory.join(numbered)
            })
            .find(|p| !p.exists())
            .unwrap_or(candidate)
    }
}

impl SaveTarget for FileSaveTarget {
    #[track_caller]
    #[instrument(skip(self, artifact))]
    fn save(&mut self, artifact: &StagedArtifact, file_name: &str) -> CoreResult<SaveOutcome> {
        fs::create_dir_all(&self.directory).map_err(|e| CaptureError::DownloadFailed {
            reason: format!("Failed to create {:?}: {}", self.directory, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let destination = self.available_path(file_name);

        fs::copy(artifact.path(), &destination).map_err(|e| CaptureError::DownloadFailed {
            reason: format!("Failed to write {:?}: {}", destination, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(path = ?destination, bytes = artifact.len(), "Recording saved");

        Ok(SaveOutcome::Saved(destination))
    }
}

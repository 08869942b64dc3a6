//! Save-as dialog for finished recordings.
//!
//! Prompts through the native file dialog, then copies the staged recording
//! to the chosen location. Falls back to numbered files in a directory when
//! prompting is disabled.

use webcam_recorder_core::{
    CaptureError, CoreResult, FileSaveTarget, SaveOutcome, SaveTarget, StagedArtifact,
};

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use rfd::AsyncFileDialog;
use tracing::{info, instrument};

/// Asks the user where to save each recording.
#[derive(Debug, Clone)]
pub struct DialogSaveTarget {
    start_dir: PathBuf,
}

impl DialogSaveTarget {
    /// Open dialogs in `start_dir`.
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
        }
    }
}

impl SaveTarget for DialogSaveTarget {
    #[track_caller]
    #[instrument(skip(self, artifact))]
    fn save(&mut self, artifact: &StagedArtifact, file_name: &str) -> CoreResult<SaveOutcome> {
        let extension = Path::new(file_name)
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "webm".to_string());

        let dialog = AsyncFileDialog::new()
            .set_title("Save recording")
            .set_directory(&self.start_dir)
            .set_file_name(file_name)
            .add_filter("Video", &[extension.as_str()]);

        // Called from a blocking worker; the dialog itself is driven by the UI thread.
        let Some(handle) = pollster::block_on(dialog.save_file()) else {
            info!("Save dialog cancelled");
            return Ok(SaveOutcome::Cancelled);
        };

        let destination = handle.path().to_path_buf();

        fs::copy(artifact.path(), &destination).map_err(|e| CaptureError::DownloadFailed {
            reason: format!("Failed to write {:?}: {}", destination, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(path = ?destination, bytes = artifact.len(), "Recording saved");

        Ok(SaveOutcome::Saved(destination))
    }
}

/// The save target configured by the user.
pub fn save_target(prompt: bool, directory: PathBuf) -> Box<dyn SaveTarget> {
    if prompt {
        Box::new(DialogSaveTarget::new(directory))
    } else {
        Box::new(FileSaveTarget::new(directory))
    }
}

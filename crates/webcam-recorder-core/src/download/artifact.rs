use crate::{CaptureError, CoreResult};

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use tracing::{debug, warn};
use uuid::Uuid;

/// Marker in the file name of every staged artifact.
pub(crate) const STAGED_MARKER: &str = ".staged";

/// A complete recording: all chunks joined, tagged with its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    bytes: Vec<u8>,
    mime_type: &'static str,
}

impl Artifact {
    /// Wrap assembled bytes.
    pub fn new(bytes: Vec<u8>, mime_type: &'static str) -> Self {
        Self { bytes, mime_type }
    }

    /// Encoded recording.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Container media type.
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// File extension matching the media type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type {
            "video/webm" => "webm",
            "video/mp4" => "mp4",
            "video/x-matroska" => "mkv",
            _ => "bin",
        }
    }
}

/// An artifact materialized in the staging directory.
///
/// This is the transient reference handed to a [`SaveTarget`](crate::SaveTarget).
/// The staging file is removed when the value is dropped.
#[derive(Debug)]
pub struct StagedArtifact {
    path: PathBuf,
    len: u64,
    mime_type: &'static str,
}

impl StagedArtifact {
    /// Write `artifact` into `dir` under a fresh name.
    #[track_caller]
    pub(crate) fn stage(dir: &Path, artifact: &Artifact) -> CoreResult<Self> {
        fs::create_dir_all(dir).map_err(|e| CaptureError::DownloadFailed {
            reason: format!("Failed to create staging directory {:?}: {}", dir, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let path = dir.join(format!(
            "{}{}.{}",
            Uuid::new_v4(),
            STAGED_MARKER,
            artifact.extension()
        ));

        fs::write(&path, artifact.bytes()).map_err(|e| CaptureError::DownloadFailed {
            reason: format!("Failed to stage recording at {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(path = ?path, bytes = artifact.bytes().len(), "Recording staged");

        Ok(Self {
            path,
            len: artifact.bytes().len() as u64,
            mime_type: artifact.mime_type(),
        })
    }

    /// Location of the staged file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the staged recording is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Container media type.
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }
}

impl Drop for StagedArtifact {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = ?self.path, "Staged recording released"),
            Err(e) => warn!(path = ?self.path, error = %e, "Failed to remove staged recording"),
        }
    }
}

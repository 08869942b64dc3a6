use crate::{
    Artifact, Chunk, ChunkBuffer, CoreResult, SaveOutcome, SaveTarget, StagedArtifact,
    download::artifact::STAGED_MARKER,
};

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument, warn};

/// File name suggested for every download.
pub const DEFAULT_FILE_NAME: &str = "webcam-stream-capture.webm";

/// Turns accumulated chunks into a saved file.
#[derive(Debug, Clone)]
pub struct DownloadTrigger {
    file_name: String,
    staging_dir: PathBuf,
    mime_type: &'static str,
}

impl DownloadTrigger {
    /// Stage recordings in `staging_dir` and suggest `file_name` when saving.
    pub fn new(
        file_name: impl Into<String>,
        staging_dir: impl Into<PathBuf>,
        mime_type: &'static str,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            staging_dir: staging_dir.into(),
            mime_type,
        }
    }

    /// Suggested file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Directory holding staged recordings.
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Assemble every chunk into one recording and hand it to `target`.
    ///
    /// Returns `Ok(None)` without touching `target` when no chunk is
    /// available. The chunks that went into the recording are discarded
    /// only once the target reports [`SaveOutcome::Saved`]; a chunk that
    /// arrives while saving is kept for the next download.
    #[track_caller]
    #[instrument(skip(self, chunks, target))]
    pub fn download(
        &self,
        chunks: &ChunkBuffer,
        target: &mut dyn SaveTarget,
    ) -> CoreResult<Option<PathBuf>> {
        let snapshot = chunks.snapshot();
        if snapshot.is_empty() {
            debug!("Nothing recorded, download skipped");
            return Ok(None);
        }

        let artifact = Artifact::new(Chunk::concat(&snapshot), self.mime_type);
        let staged = StagedArtifact::stage(&self.staging_dir, &artifact)?;

        let outcome = target.save(&staged, &self.file_name)?;
        drop(staged);

        match outcome {
            SaveOutcome::Saved(path) => {
                chunks.discard_front(snapshot.len());
                info!(
                    path = ?path,
                    chunk_count = snapshot.len(),
                    bytes = artifact.bytes().len(),
                    "Recording downloaded"
                );
                Ok(Some(path))
            }
            SaveOutcome::Cancelled => {
                info!(
                    chunk_count = snapshot.len(),
                    "Download cancelled, recording kept"
                );
                Ok(None)
            }
        }
    }

    /// Remove staged recordings left behind by an earlier run.
    #[instrument(skip(self))]
    pub fn purge_staging(&self) {
        let entries = match fs::read_dir(&self.staging_dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let name = entry.file_name();
            if !name.to_string_lossy().contains(STAGED_MARKER) {
                continue;
            }
            match fs::remove_file(entry.path()) {
                Ok(()) => debug!(path = ?entry.path(), "Removed leftover staged recording"),
                Err(e) => {
                    warn!(path = ?entry.path(), error = %e, "Failed to remove staged recording")
                }
            }
        }
    }
}

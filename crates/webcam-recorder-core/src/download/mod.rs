mod artifact;
mod target;
mod trigger;

pub use {
    artifact::{Artifact, StagedArtifact},
    target::{FileSaveTarget, SaveOutcome, SaveTarget},
    trigger::{DEFAULT_FILE_NAME, DownloadTrigger},
};

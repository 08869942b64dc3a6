//! Webcam Recorder Core Library
//!
//! Preview a camera, record it to WebM and save the recording. Camera,
//! recorder, device enumeration and saving are injected capabilities, so the
//! recording logic runs the same against GStreamer or against test doubles.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "gstreamer")]
//! # fn main() -> webcam_recorder_core::CoreResult<()> {
//! use webcam_recorder_core::{
//!     Capabilities, FileSaveTarget, RecorderOptions, WebcamRecorder,
//!     backends::gstreamer::{GstCaptureProvider, GstDeviceEnumerator, GstRecorderProvider},
//! };
//!
//! use std::{thread::sleep, time::Duration};
//!
//! let capabilities = Capabilities {
//!     capture: Box::new(GstCaptureProvider::new()?),
//!     recorders: Box::new(GstRecorderProvider::new()),
//!     devices: Box::new(GstDeviceEnumerator::new()?),
//! };
//! let options = RecorderOptions {
//!     video: Default::default(),
//!     audio_enabled: true,
//!     facing_mode: Default::default(),
//!     selector_mode: Default::default(),
//!     file_name: webcam_recorder_core::DEFAULT_FILE_NAME.to_string(),
//!     staging_dir: std::env::temp_dir().join("webcam-recorder"),
//! };
//!
//! let mut recorder = WebcamRecorder::new(capabilities, options);
//! recorder.mount()?;
//! recorder.start_capture()?;
//! sleep(Duration::from_secs(3));
//! recorder.stop_capture()?;
//!
//! let mut target = FileSaveTarget::new("recordings");
//! if let Some(path) = recorder.download(&mut target)? {
//!     println!("Saved to {}", path.display());
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "gstreamer"))]
//! # fn main() {}
//! ```

pub mod backends;
mod capture;
mod devices;
mod download;
mod error;
mod recorder;
mod session;

pub use {
    capture::{
        CameraConstraint, CameraSelector, CaptureConstraints, CaptureProvider, CaptureSurface,
        DEFAULT_HEIGHT, DEFAULT_WIDTH, FacingMode, MAX_DIMENSION, MediaStream, SelectorMode,
        VideoConstraints,
    },
    devices::{
        DeviceEnumerator, DeviceId, DeviceSelector, MediaDeviceInfo, MediaDeviceKind,
        device_for_facing_mode,
    },
    download::{
        Artifact, DEFAULT_FILE_NAME, DownloadTrigger, FileSaveTarget, SaveOutcome, SaveTarget,
        StagedArtifact,
    },
    error::CaptureError,
    error::Result as CoreResult,
    recorder::{
        Capabilities, ControlsView, RecorderOptions, START_CAPTURE_LABEL, STOP_CAPTURE_LABEL,
        WebcamRecorder,
    },
    session::{
        Chunk, ChunkBuffer, ChunkSink, MediaRecorder, RecorderProvider, RecordingSession,
        SessionState, WEBM_MIME_TYPE,
    },
};

#[cfg(test)]
mod tests;

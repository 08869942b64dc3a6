//! The webcam recording component.
//!
//! [`WebcamRecorder`] owns the view state (audio flag, camera selection,
//! capture toggle) and keeps the Capture Surface, the Recording Session and
//! the Download Trigger in step with it.

use crate::{
    CameraSelector, CaptureConstraints, CaptureError, CaptureProvider, CaptureSurface, CoreResult,
    DeviceEnumerator, DeviceId, DeviceSelector, DownloadTrigger, FacingMode, MediaDeviceInfo,
    RecorderProvider, RecordingSession, SaveTarget, SelectorMode, SessionState, VideoConstraints,
    WEBM_MIME_TYPE,
};

use std::{panic::Location, path::PathBuf};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Label of the capture toggle while idle.
pub const START_CAPTURE_LABEL: &str = "Start Capture";

/// Label of the capture toggle while capturing.
pub const STOP_CAPTURE_LABEL: &str = "Stop Capture";

/// Boundary capabilities the component is built from.
pub struct Capabilities {
    /// Opens camera/microphone streams.
    pub capture: Box<dyn CaptureProvider>,
    /// Creates recorders bound to a stream.
    pub recorders: Box<dyn RecorderProvider>,
    /// Lists media devices.
    pub devices: Box<dyn DeviceEnumerator>,
}

/// Initial view state.
#[derive(Debug, Clone)]
pub struct RecorderOptions {
    /// Fixed video parameters.
    pub video: VideoConstraints,
    /// Whether the microphone is included initially.
    pub audio_enabled: bool,
    /// Initial facing mode.
    pub facing_mode: FacingMode,
    /// Which camera controls are offered.
    pub selector_mode: SelectorMode,
    /// File name suggested on download.
    pub file_name: String,
    /// Directory for staged recordings.
    pub staging_dir: PathBuf,
}

/// Everything a front end needs to draw the controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsView {
    /// Audio checkbox state.
    pub audio_enabled: bool,
    /// Whether the preview is mirrored.
    pub mirrored: bool,
    /// Whether a recorder is active.
    pub capturing: bool,
    /// Text of the capture toggle.
    pub capture_label: &'static str,
    /// Whether the Download control is shown.
    pub download_available: bool,
    /// Which camera controls to show.
    pub selector_mode: SelectorMode,
    /// Current facing mode.
    pub facing_mode: FacingMode,
    /// Enumerated video inputs.
    pub devices: Vec<MediaDeviceInfo>,
    /// Explicitly selected device.
    pub selected_device: Option<DeviceId>,
}

/// Camera preview, recording session and download in one component.
pub struct WebcamRecorder {
    surface: CaptureSurface,
    session: RecordingSession,
    enumerator: Box<dyn DeviceEnumerator>,
    device_selector: DeviceSelector,
    camera: CameraSelector,
    download: DownloadTrigger,
    video: VideoConstraints,
    audio_enabled: bool,
    selector_mode: SelectorMode,
    mounted: bool,
    /// Constraints changed while capturing; reopen the stream after stop.
    reconfigure_pending: bool,
    torn_down: bool,
}

impl WebcamRecorder {
    /// Build the component. Nothing touches a device until [`mount`](Self::mount).
    pub fn new(capabilities: Capabilities, options: RecorderOptions) -> Self {
        Self {
            surface: CaptureSurface::new(capabilities.capture),
            session: RecordingSession::new(capabilities.recorders, WEBM_MIME_TYPE),
            enumerator: capabilities.devices,
            device_selector: DeviceSelector::new(),
            camera: CameraSelector::new(options.facing_mode),
            download: DownloadTrigger::new(options.file_name, options.staging_dir, WEBM_MIME_TYPE),
            video: options.video,
            audio_enabled: options.audio_enabled,
            selector_mode: options.selector_mode,
            mounted: false,
            reconfigure_pending: false,
            torn_down: false,
        }
    }

    /// Activate the component: enumerate devices once and open the stream.
    ///
    /// Later calls do nothing. Enumeration failure is logged and leaves the
    /// device list empty.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if the stream cannot be opened.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn mount(&mut self) -> CoreResult<()> {
        if self.mounted {
            debug!("Already mounted");
            return Ok(());
        }
        self.mounted = true;
        self.torn_down = false;

        self.download.purge_staging();

        if let Err(e) = self.device_selector.enumerate(self.enumerator.as_mut()) {
            warn!(error = ?e, "Device enumeration failed");
        }

        self.apply_constraints()
    }

    /// Flip the audio checkbox.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn toggle_audio(&mut self) -> CoreResult<bool> {
        self.set_audio_enabled(!self.audio_enabled)?;
        Ok(self.audio_enabled)
    }

    /// Include or exclude the microphone track.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn set_audio_enabled(&mut self, enabled: bool) -> CoreResult<()> {
        if self.audio_enabled == enabled {
            return Ok(());
        }
        self.audio_enabled = enabled;
        info!(audio_enabled = enabled, "Audio toggled");
        self.constraints_changed()
    }

    /// Switch between front and rear camera.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn toggle_facing_mode(&mut self) -> CoreResult<FacingMode> {
        let facing_mode = self.camera.toggle_facing_mode();
        info!(facing_mode = %facing_mode, "Facing mode toggled");
        self.constraints_changed()?;
        Ok(facing_mode)
    }

    /// Use an enumerated video input instead of the facing mode.
    ///
    /// # Errors
    ///
    /// `DeviceNotFound` if `device_id` is not an enumerated video input.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn select_device(&mut self, device_id: DeviceId) -> CoreResult<()> {
        let Some(device) = self.device_selector.find(&device_id) else {
            return Err(CaptureError::DeviceNotFound {
                device_id: device_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        info!(device_id = %device_id, label = %device.label, "Device selected");

        self.camera.select_device(device_id);
        self.constraints_changed()
    }

    /// Begin recording the current stream.
    ///
    /// # Errors
    ///
    /// See [`RecordingSession::start`].
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start_capture(&mut self) -> CoreResult<Uuid> {
        self.session.start(self.surface.stream())
    }

    /// Stop recording, then apply any constraint change made meanwhile.
    ///
    /// # Errors
    ///
    /// See [`RecordingSession::stop`]. The recorder's error takes precedence;
    /// a failure to reopen the stream is returned only when the recorder
    /// finalized cleanly, and is logged otherwise.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop_capture(&mut self) -> CoreResult<()> {
        let stopped = self.session.stop();

        let reopened = if self.reconfigure_pending {
            self.reconfigure_pending = false;
            self.apply_constraints()
        } else {
            Ok(())
        };

        if let (Err(_), Err(reopen)) = (&stopped, &reopened) {
            warn!(error = ?reopen, "Failed to reopen stream after recorder error");
        }

        stopped.and(reopened)
    }

    /// Start when idle, stop when capturing. Returns whether now capturing.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn toggle_capture(&mut self) -> CoreResult<bool> {
        if self.session.is_capturing() {
            self.stop_capture()?;
        } else {
            self.start_capture()?;
        }
        Ok(self.session.is_capturing())
    }

    /// Save the accumulated recording through `target`.
    ///
    /// Returns the saved path, or `None` when there was nothing to save or
    /// the user cancelled.
    #[track_caller]
    #[instrument(skip(self, target))]
    pub fn download(&mut self, target: &mut dyn SaveTarget) -> CoreResult<Option<PathBuf>> {
        self.download.download(self.session.chunks(), target)
    }

    /// Whether the Download control should be offered.
    pub fn has_recording(&self) -> bool {
        !self.session.chunks().is_empty()
    }

    /// Current recording state.
    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    /// Constraints the Capture Surface is (or will be, after stop) configured with.
    pub fn capture_constraints(&self) -> CaptureConstraints {
        CaptureConstraints::new(&self.video, self.camera.constraint(), self.audio_enabled)
    }

    /// Constraints of the live stream, if one is open.
    pub fn active_constraints(&self) -> Option<CaptureConstraints> {
        self.surface.stream().map(|s| s.constraints().clone())
    }

    /// Snapshot of the view state.
    pub fn controls(&self) -> ControlsView {
        let capturing = self.session.is_capturing();
        ControlsView {
            audio_enabled: self.audio_enabled,
            mirrored: self.video.mirrored,
            capturing,
            capture_label: if capturing {
                STOP_CAPTURE_LABEL
            } else {
                START_CAPTURE_LABEL
            },
            download_available: self.has_recording(),
            selector_mode: self.selector_mode,
            facing_mode: self.camera.facing_mode(),
            devices: self.device_selector.devices().to_vec(),
            selected_device: self.camera.selected_device().cloned(),
        }
    }

    /// Release the recorder, the stream tracks and staged recordings.
    ///
    /// Runs automatically on drop. Safe to call more than once.
    #[instrument(skip(self))]
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.mounted = false;

        if self.session.is_capturing()
            && let Err(e) = self.session.stop()
        {
            warn!(error = ?e, "Failed to stop recorder during teardown");
        }

        self.surface.release();
        self.download.purge_staging();

        info!("Webcam recorder torn down");
    }

    #[track_caller]
    fn constraints_changed(&mut self) -> CoreResult<()> {
        if !self.mounted {
            return Ok(());
        }

        if self.session.is_capturing() {
            debug!("Capturing, stream reconfiguration deferred until stop");
            self.reconfigure_pending = true;
            return Ok(());
        }

        self.apply_constraints()
    }

    #[track_caller]
    fn apply_constraints(&mut self) -> CoreResult<()> {
        self.video.validate()?;
        let constraints = self.capture_constraints();
        self.surface.configure(&constraints)
    }
}

impl Drop for WebcamRecorder {
    fn drop(&mut self) {
        self.teardown();
    }
}

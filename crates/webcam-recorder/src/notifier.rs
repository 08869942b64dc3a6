//! Desktop notifications for save results and failures.

use crate::{AppError, AppResult};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use notify_rust::Notification;
use tracing::{instrument, warn};

const APP_NAME: &str = "Webcam Recorder";

/// Shows short desktop notifications.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    _private: (),
}

impl Notifier {
    /// Create a notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tell the user where the recording went.
    pub fn saved(&self, path: &Path) {
        self.show_or_log(&format!("Recording saved to {}", path.display()));
    }

    /// Surface a failure the user triggered.
    pub fn failed(&self, action: &str, error: &AppError) {
        self.show_or_log(&format!("{} failed: {}", action, user_message(error)));
    }

    /// Show a notification with `body`.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn show(&self, body: &str) -> AppResult<()> {
        Notification::new()
            .appname(APP_NAME)
            .summary(APP_NAME)
            .body(body)
            .show()
            .map_err(|e| AppError::NotificationFailed {
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;
        Ok(())
    }

    fn show_or_log(&self, body: &str) {
        if let Err(e) = self.show(body) {
            warn!(error = ?e, body, "Failed to show notification");
        }
    }
}

/// Error text without source locations.
pub(crate) fn user_message(error: &AppError) -> String {
    use webcam_recorder_core::CaptureError;

    match error {
        AppError::Capture { source, .. } => match source {
            CaptureError::NoStreamAvailable { .. } => "No camera is available".to_string(),
            CaptureError::PermissionDenied { .. } => {
                "Camera or microphone access was denied".to_string()
            }
            CaptureError::DeviceError { reason, .. }
            | CaptureError::InvalidConstraints { reason, .. }
            | CaptureError::Recorder { reason, .. }
            | CaptureError::DownloadFailed { reason, .. } => reason.clone(),
            CaptureError::DeviceNotFound { device_id, .. } => {
                format!("Camera {} is no longer available", device_id)
            }
            CaptureError::InvalidState {
                operation, state, ..
            } => format!("Cannot {} while {}", operation, state),
        },
        AppError::HotkeyRegistrationFailed { reason, .. }
        | AppError::TrayError { reason, .. }
        | AppError::NotificationFailed { reason, .. }
        | AppError::TaskFailed { reason, .. }
        | AppError::ConfigError { reason, .. } => reason.clone(),
        AppError::ChannelSendFailed { message, .. } => message.clone(),
        AppError::IoError { source, .. } => source.to_string(),
    }
}

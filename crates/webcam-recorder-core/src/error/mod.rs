use error_location::ErrorLocation;
use thiserror::Error;

/// Capture, recording and download errors with source location tracking.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// No live stream is available from the Capture Surface.
    #[error("No camera stream available {location}")]
    NoStreamAvailable {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Access to the camera or microphone was refused.
    #[error("Camera or microphone permission denied: {reason} {location}")]
    PermissionDenied {
        /// Description reported by the platform.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Opening or reconfiguring a capture device failed.
    #[error("Capture device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Video constraints no backend can satisfy.
    #[error("Invalid capture constraints: {reason} {location}")]
    InvalidConstraints {
        /// Which value was rejected.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Requested device is not part of the enumerated device list.
    #[error("Device not found: {device_id} {location}")]
    DeviceNotFound {
        /// Identifier that was requested.
        device_id: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Creating, starting or stopping the recorder failed.
    #[error("Recorder error: {reason} {location}")]
    Recorder {
        /// Description of the recorder error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Operation is not valid in the current session state.
    #[error("Cannot {operation} while {state} {location}")]
    InvalidState {
        /// Operation that was attempted.
        operation: &'static str,
        /// Session state at the time of the attempt.
        state: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Assembling or saving the recording failed.
    #[error("Download failed: {reason} {location}")]
    DownloadFailed {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`CaptureError`].
pub type Result<T> = std::result::Result<T, CaptureError>;

use crate::{CaptureError, CoreResult, DeviceId};

use std::{fmt, panic::Location};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Requested capture width in pixels.
pub const DEFAULT_WIDTH: u32 = 420;

/// Requested capture height in pixels.
pub const DEFAULT_HEIGHT: u32 = 420;

/// Largest width or height backends can negotiate (signed 32-bit caps fields).
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

/// Which side of the device the camera faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front camera, facing the user.
    #[default]
    User,
    /// Rear camera, facing away from the user.
    Environment,
}

impl FacingMode {
    /// The opposite facing mode.
    pub fn toggled(self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }

    /// Constraint keyword for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

impl fmt::Display for FacingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single camera-selection axis of a capture request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraConstraint {
    /// Pick whichever camera faces this way.
    FacingMode(FacingMode),
    /// Use exactly this device.
    Device(DeviceId),
}

/// Fixed video parameters of the Capture Surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoConstraints {
    /// Requested width in pixels.
    pub width: u32,
    /// Requested height in pixels.
    pub height: u32,
    /// Mirror the preview horizontally. Display only, never recorded.
    pub mirrored: bool,
}

impl VideoConstraints {
    /// Reject sizes no backend can negotiate.
    ///
    /// # Errors
    ///
    /// `InvalidConstraints` when width or height is zero or above
    /// [`MAX_DIMENSION`].
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_DIMENSION {
                return Err(CaptureError::InvalidConstraints {
                    reason: format!("{} must be in 1..={}, got {}", name, MAX_DIMENSION, value),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }
        Ok(())
    }
}

impl Default for VideoConstraints {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            mirrored: true,
        }
    }
}

/// Everything a [`CaptureProvider`](crate::CaptureProvider) needs to open a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConstraints {
    /// Requested width in pixels.
    pub width: u32,
    /// Requested height in pixels.
    pub height: u32,
    /// Facing mode or explicit device.
    pub camera: CameraConstraint,
    /// Include a microphone track.
    pub audio: bool,
}

impl CaptureConstraints {
    /// Combine the fixed video parameters with the current selection and audio flag.
    pub fn new(video: &VideoConstraints, camera: CameraConstraint, audio: bool) -> Self {
        Self {
            width: video.width,
            height: video.height,
            camera,
            audio,
        }
    }
}

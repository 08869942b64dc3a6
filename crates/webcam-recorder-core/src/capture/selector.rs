use crate::{CameraConstraint, DeviceId, FacingMode};

use serde::{Deserialize, Serialize};

/// Which camera controls the front end offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorMode {
    /// A single button flipping between front and rear camera.
    #[default]
    FacingModeToggle,
    /// One entry per enumerated video input.
    DeviceList,
}

/// Camera selection state shared by both selector modes.
///
/// An explicitly selected device overrides the facing mode. Flipping the
/// facing mode never clears the device override.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraSelector {
    facing_mode: FacingMode,
    device_id: Option<DeviceId>,
}

impl CameraSelector {
    /// Start from the given facing mode with no device override.
    pub fn new(facing_mode: FacingMode) -> Self {
        Self {
            facing_mode,
            device_id: None,
        }
    }

    /// Flip between `user` and `environment`.
    pub fn toggle_facing_mode(&mut self) -> FacingMode {
        self.facing_mode = self.facing_mode.toggled();
        self.facing_mode
    }

    /// Override the facing mode with an explicit device.
    pub fn select_device(&mut self, device_id: DeviceId) {
        self.device_id = Some(device_id);
    }

    /// Current facing mode, regardless of any device override.
    pub fn facing_mode(&self) -> FacingMode {
        self.facing_mode
    }

    /// Explicitly selected device, if any.
    pub fn selected_device(&self) -> Option<&DeviceId> {
        self.device_id.as_ref()
    }

    /// The constraint handed to the Capture Surface.
    pub fn constraint(&self) -> CameraConstraint {
        match &self.device_id {
            Some(id) => CameraConstraint::Device(id.clone()),
            None => CameraConstraint::FacingMode(self.facing_mode),
        }
    }
}

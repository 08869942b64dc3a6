use webcam_recorder_core::{DEFAULT_HEIGHT, DEFAULT_WIDTH, VideoConstraints};

use serde::{Deserialize, Serialize};

/// Capture resolution and preview orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Requested width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Requested height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Mirror the preview.
    #[serde(default = "default_mirrored")]
    pub mirrored: bool,
}

impl VideoConfig {
    /// Constraints handed to the recorder component.
    pub fn constraints(&self) -> VideoConstraints {
        VideoConstraints {
            width: self.width,
            height: self.height,
            mirrored: self.mirrored,
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        let defaults = VideoConstraints::default();
        Self {
            width: defaults.width,
            height: defaults.height,
            mirrored: defaults.mirrored,
        }
    }
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_mirrored() -> bool {
    true
}

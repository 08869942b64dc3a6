use crate::config::default_audio_enabled;

use serde::{Deserialize, Serialize};
use webcam_recorder_core::{FacingMode, SelectorMode};

/// Initial capture settings. Only seeds the view state at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Include the microphone when the app starts.
    #[serde(default = "default_audio_enabled")]
    pub audio_enabled: bool,
    /// Camera side selected at startup.
    #[serde(default)]
    pub facing_mode: FacingMode,
    /// Front/rear toggle or per-device menu.
    #[serde(default)]
    pub selector_mode: SelectorMode,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            audio_enabled: default_audio_enabled(),
            facing_mode: FacingMode::default(),
            selector_mode: SelectorMode::default(),
        }
    }
}

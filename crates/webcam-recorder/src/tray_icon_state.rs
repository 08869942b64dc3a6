use webcam_recorder_core::ControlsView;

/// Tray icon states corresponding to the recorder's session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Previewing, ready to capture.
    Idle,
    /// A recorder is producing chunks.
    Capturing,
}

impl TrayIconState {
    /// Icon state for a view snapshot.
    pub fn for_view(view: &ControlsView) -> Self {
        if view.capturing {
            TrayIconState::Capturing
        } else {
            TrayIconState::Idle
        }
    }

    /// Tooltip shown while in this state.
    pub fn tooltip(self) -> &'static str {
        match self {
            TrayIconState::Idle => "Webcam Recorder - Ready",
            TrayIconState::Capturing => "Webcam Recorder - Capturing...",
        }
    }
}

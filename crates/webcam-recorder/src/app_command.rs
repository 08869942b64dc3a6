use webcam_recorder_core::DeviceId;

/// Commands sent from the tray menu and hotkey handler to the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Flip the "Record audio" checkbox.
    ToggleAudio,
    /// Switch between front and rear camera.
    ToggleFacingMode,
    /// Use a specific camera.
    SelectDevice {
        /// Enumerated device to switch to.
        device_id: DeviceId,
    },
    /// Start capturing when idle, stop when capturing.
    ToggleCapture,
    /// Save the accumulated recording.
    Download,
    /// Open the save directory in the file manager.
    OpenDownloads,
    /// Request application shutdown.
    Shutdown,
}

impl AppCommand {
    /// Short user-facing name, used in failure notifications.
    pub fn label(&self) -> &'static str {
        match self {
            AppCommand::ToggleAudio => "Audio toggle",
            AppCommand::ToggleFacingMode => "Camera switch",
            AppCommand::SelectDevice { .. } => "Camera selection",
            AppCommand::ToggleCapture => "Capture",
            AppCommand::Download => "Download",
            AppCommand::OpenDownloads => "Opening the downloads folder",
            AppCommand::Shutdown => "Shutdown",
        }
    }
}

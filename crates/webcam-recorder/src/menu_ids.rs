//! Stable tray menu item IDs and their commands.
//!
//! Menu items are created on the UI thread while menu events are handled on
//! the runtime thread, so both sides agree on IDs instead of sharing handles.

use crate::AppCommand;

use webcam_recorder_core::DeviceId;

pub(crate) const AUDIO: &str = "audio";
pub(crate) const SWITCH_CAMERA: &str = "switch-camera";
pub(crate) const CAMERA_MENU: &str = "camera";
pub(crate) const CAPTURE: &str = "capture";
pub(crate) const DOWNLOAD: &str = "download";
pub(crate) const OPEN_DOWNLOADS: &str = "open-downloads";
pub(crate) const EXIT: &str = "exit";

const DEVICE_PREFIX: &str = "device:";

/// Menu ID of the entry for `device_id`.
pub(crate) fn device_item_id(device_id: &DeviceId) -> String {
    format!("{}{}", DEVICE_PREFIX, device_id)
}

/// Command for a clicked menu item, if it maps to one.
pub(crate) fn menu_command(id: &str) -> Option<AppCommand> {
    match id {
        AUDIO => Some(AppCommand::ToggleAudio),
        SWITCH_CAMERA => Some(AppCommand::ToggleFacingMode),
        CAPTURE => Some(AppCommand::ToggleCapture),
        DOWNLOAD => Some(AppCommand::Download),
        OPEN_DOWNLOADS => Some(AppCommand::OpenDownloads),
        EXIT => Some(AppCommand::Shutdown),
        other => other
            .strip_prefix(DEVICE_PREFIX)
            .filter(|device_id| !device_id.is_empty())
            .map(|device_id| AppCommand::SelectDevice {
                device_id: DeviceId::new(device_id),
            }),
    }
}

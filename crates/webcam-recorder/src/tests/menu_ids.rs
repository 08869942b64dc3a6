use crate::{
    AppCommand,
    menu_ids::{self, device_item_id, menu_command},
};

use webcam_recorder_core::DeviceId;

/// WHAT: Fixed menu items map to their commands
/// WHY: Menu events arrive on the runtime thread with only the item ID
#[test]
fn given_fixed_menu_ids_when_mapping_then_matching_commands() {
    assert_eq!(menu_command(menu_ids::AUDIO), Some(AppCommand::ToggleAudio));
    assert_eq!(
        menu_command(menu_ids::SWITCH_CAMERA),
        Some(AppCommand::ToggleFacingMode)
    );
    assert_eq!(
        menu_command(menu_ids::CAPTURE),
        Some(AppCommand::ToggleCapture)
    );
    assert_eq!(menu_command(menu_ids::DOWNLOAD), Some(AppCommand::Download));
    assert_eq!(
        menu_command(menu_ids::OPEN_DOWNLOADS),
        Some(AppCommand::OpenDownloads)
    );
    assert_eq!(menu_command(menu_ids::EXIT), Some(AppCommand::Shutdown));
}

/// WHAT: A device entry ID maps back to SelectDevice with the same device
/// WHY: Device IDs may contain path separators and colons
#[test]
fn given_device_item_id_when_mapping_then_select_device_round_trips() {
    // Given: A V4L2-style device ID
    let device_id = DeviceId::new("/dev/video0:usb");

    // When: Building and mapping its menu ID
    let command = menu_command(&device_item_id(&device_id));

    // Then: The same device is selected
    assert_eq!(command, Some(AppCommand::SelectDevice { device_id }));
}

/// WHAT: Submenu headers and unknown IDs map to nothing
/// WHY: Clicking the "Camera" header must not trigger a command
#[test]
fn given_non_command_ids_when_mapping_then_none() {
    assert_eq!(menu_command(menu_ids::CAMERA_MENU), None);
    assert_eq!(menu_command("device:"), None);
    assert_eq!(menu_command("settings"), None);
    assert_eq!(menu_command(""), None);
}

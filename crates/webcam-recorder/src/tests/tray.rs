use crate::{TrayIconState, tray_manager::switch_camera_label};

use webcam_recorder_core::{
    ControlsView, FacingMode, START_CAPTURE_LABEL, STOP_CAPTURE_LABEL, SelectorMode,
};

fn view(capturing: bool) -> ControlsView {
    ControlsView {
        audio_enabled: true,
        mirrored: true,
        capturing,
        capture_label: if capturing {
            STOP_CAPTURE_LABEL
        } else {
            START_CAPTURE_LABEL
        },
        download_available: false,
        selector_mode: SelectorMode::FacingModeToggle,
        facing_mode: FacingMode::User,
        devices: Vec::new(),
        selected_device: None,
    }
}

/// WHAT: The icon follows the capture state
/// WHY: The tray icon is the only always-visible capture indicator
#[test]
fn given_view_when_choosing_icon_state_then_matches_capturing() {
    assert_eq!(TrayIconState::for_view(&view(false)), TrayIconState::Idle);
    assert_eq!(
        TrayIconState::for_view(&view(true)),
        TrayIconState::Capturing
    );
    assert_ne!(
        TrayIconState::Idle.tooltip(),
        TrayIconState::Capturing.tooltip()
    );
}

/// WHAT: The switch item offers the opposite camera
/// WHY: The label describes what clicking will do
#[test]
fn given_facing_mode_when_labelling_switch_then_opposite_side_named() {
    let facing_user = switch_camera_label(FacingMode::User);
    let facing_rear = switch_camera_label(FacingMode::Environment);

    assert!(facing_user.contains("Rear"));
    assert!(facing_rear.contains("Front"));
}

use crate::AppCommand;

use webcam_recorder_core::DeviceId;

/// WHAT: Every command has a distinct, non-empty label
/// WHY: Labels prefix failure notifications and must tell the user what failed
#[test]
fn given_all_commands_when_labelled_then_distinct_and_non_empty() {
    // Given: One of each command
    let commands = [
        AppCommand::ToggleAudio,
        AppCommand::ToggleFacingMode,
        AppCommand::SelectDevice {
            device_id: DeviceId::new("cam"),
        },
        AppCommand::ToggleCapture,
        AppCommand::Download,
        AppCommand::OpenDownloads,
        AppCommand::Shutdown,
    ];

    // When: Collecting labels
    let mut labels: Vec<&str> = commands.iter().map(AppCommand::label).collect();

    // Then: None empty, none repeated
    assert!(labels.iter().all(|l| !l.is_empty()));
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), commands.len());
}

use crate::{AppCommand, AppError, hotkey_handler::forward_toggle};

use tokio::sync::mpsc;

/// WHAT: A hotkey press forwards exactly one ToggleCapture
/// WHY: Capture state lives in the recorder; the hotkey must not decide start vs stop
#[tokio::test]
async fn given_open_channel_when_forwarding_toggle_then_single_toggle_received() {
    // Given: An open command channel
    let (command_tx, mut command_rx) = mpsc::channel(32);

    // When: Forwarding a hotkey press
    forward_toggle(&command_tx).await.unwrap();

    // Then: Exactly one ToggleCapture is queued
    assert_eq!(command_rx.recv().await, Some(AppCommand::ToggleCapture));
    assert!(command_rx.try_recv().is_err());
}

/// WHAT: Consecutive presses each produce a toggle
/// WHY: Start and stop are both driven by the same key
#[tokio::test]
async fn given_two_presses_when_forwarding_then_two_toggles_in_order() {
    // Given: An open command channel
    let (command_tx, mut command_rx) = mpsc::channel(32);

    // When: Forwarding two presses
    forward_toggle(&command_tx).await.unwrap();
    forward_toggle(&command_tx).await.unwrap();

    // Then: Both arrive
    assert_eq!(command_rx.recv().await, Some(AppCommand::ToggleCapture));
    assert_eq!(command_rx.recv().await, Some(AppCommand::ToggleCapture));
}

/// WHAT: A closed command channel is reported as ChannelSendFailed
/// WHY: Lost presses must surface instead of silently vanishing
#[tokio::test]
async fn given_closed_channel_when_forwarding_toggle_then_channel_error() {
    // Given: A closed command channel
    let (command_tx, command_rx) = mpsc::channel(1);
    drop(command_rx);

    // When: Forwarding a press
    let result = forward_toggle(&command_tx).await;

    // Then: The failure names the command
    match result {
        Err(AppError::ChannelSendFailed { message, .. }) => {
            assert!(message.contains("ToggleCapture"));
        }
        other => panic!("expected ChannelSendFailed, got {:?}", other),
    }
}

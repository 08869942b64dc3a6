use webcam_recorder_core::ControlsView;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`),
/// so all tray mutations and process lifecycle events flow through this enum.
#[derive(Debug, Clone)]
pub enum TrayCommand {
    /// Redraw icon, tooltip and menu from the recorder's view state.
    Render(ControlsView),
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}

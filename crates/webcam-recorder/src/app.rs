use crate::{AppCommand, AppError, AppResult, Notifier, TrayCommand, menu_ids};

use webcam_recorder_core::{CoreResult, SaveTarget, WebcamRecorder};

use std::{panic::Location, path::PathBuf, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tao::event_loop::EventLoopProxy;
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;

/// Main application state.
///
/// Runs on the async runtime thread. Sends tray redraws back to the main
/// thread via `tray_proxy` because `TrayIcon` is `!Send` and must remain on
/// the UI thread. Recorder calls block on GStreamer and dialogs, so they run
/// on the blocking pool.
pub struct App {
    pub(crate) recorder: Arc<Mutex<WebcamRecorder>>,
    pub(crate) save_target: Arc<Mutex<Box<dyn SaveTarget>>>,
    pub(crate) notifier: Notifier,
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) download_dir: PathBuf,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Webcam Recorder starting");

        // MenuEvent::receiver() has a blocking recv(); one persistent
        // blocking task forwards events until tray_event_rx is dropped.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        if let Err(e) = self.with_recorder(|recorder| recorder.mount()).await {
            error!(error = ?e, "Failed to open camera");
            self.notifier.failed("Opening the camera", &e);
        }
        self.render().await;

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    let Some(command) = menu_ids::menu_command(event.id.0.as_str()) else {
                        debug!(menu_id = ?event.id, "Ignoring menu event");
                        continue;
                    };
                    if self.dispatch(command).await {
                        break;
                    }
                }

                Some(command) = self.command_rx.recv() => {
                    if self.dispatch(command).await {
                        break;
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        drop(tray_event_rx);

        match tokio::time::timeout(Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        // Finalize any recording and release the camera before the UI thread exits.
        if let Err(e) = self
            .with_recorder(|recorder| {
                recorder.teardown();
                Ok(())
            })
            .await
        {
            error!(error = ?e, "Failed to tear down recorder");
        }

        let _ = self.shutdown_tx.send(true);
        if self.tray_proxy.send_event(TrayCommand::Shutdown).is_err() {
            warn!("Event loop already closed");
        }

        info!("Webcam Recorder shut down successfully");

        Ok(())
    }

    /// Execute one command and redraw. Returns `true` on shutdown.
    #[instrument(skip(self))]
    async fn dispatch(&mut self, command: AppCommand) -> bool {
        if command == AppCommand::Shutdown {
            info!("Shutdown requested");
            return true;
        }

        let label = command.label();
        if let Err(e) = self.execute(command).await {
            error!(command = label, error = ?e, "Command failed");
            self.notifier.failed(label, &e);
        }

        self.render().await;
        false
    }

    async fn execute(&mut self, command: AppCommand) -> AppResult<()> {
        match command {
            AppCommand::ToggleAudio => {
                let enabled = self.with_recorder(|r| r.toggle_audio()).await?;
                info!(audio_enabled = enabled, "Audio toggled");
            }
            AppCommand::ToggleFacingMode => {
                let facing_mode = self.with_recorder(|r| r.toggle_facing_mode()).await?;
                info!(facing_mode = %facing_mode, "Camera switched");
            }
            AppCommand::SelectDevice { device_id } => {
                self.with_recorder(move |r| r.select_device(device_id))
                    .await?;
            }
            AppCommand::ToggleCapture => {
                let capturing = self.with_recorder(|r| r.toggle_capture()).await?;
                info!(capturing, "Capture toggled");
            }
            AppCommand::Download => {
                if let Some(path) = self.download().await? {
                    self.notifier.saved(&path);
                }
            }
            AppCommand::OpenDownloads => {
                open::that(&self.download_dir)?;
                info!(dir = ?self.download_dir, "Opened downloads folder");
            }
            AppCommand::Shutdown => {}
        }

        Ok(())
    }

    async fn download(&self) -> AppResult<Option<PathBuf>> {
        let recorder = Arc::clone(&self.recorder);
        let save_target = Arc::clone(&self.save_target);

        let saved = tokio::task::spawn_blocking(move || {
            let mut target = save_target.blocking_lock();
            recorder.blocking_lock().download(&mut **target)
        })
        .await
        .map_err(|e| AppError::TaskFailed {
            reason: format!("Download task failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(saved?)
    }

    /// Run `op` against the recorder on the blocking pool.
    async fn with_recorder<T, F>(&self, op: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut WebcamRecorder) -> CoreResult<T> + Send + 'static,
    {
        let recorder = Arc::clone(&self.recorder);

        let result = tokio::task::spawn_blocking(move || {
            let mut recorder = recorder.blocking_lock();
            op(&mut recorder)
        })
        .await
        .map_err(|e| AppError::TaskFailed {
            reason: format!("Recorder task failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(result?)
    }

    async fn render(&self) {
        let view = self.recorder.lock().await.controls();
        let sent = self.tray_proxy.send_event(TrayCommand::Render(view));
        if sent.is_err() {
            debug!("Event loop closed, skipping tray render");
        }
    }
}

//! Webcam Recorder: preview, record and save webcam video from the system tray.

mod app;
mod app_command;
mod config;
mod error;
mod hotkey_handler;
mod logging;
mod menu_ids;
mod notifier;
mod save_dialog;
#[cfg(test)]
mod tests;
mod tray_command;
mod tray_icon_state;
mod tray_manager;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    notifier::Notifier,
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
};

use crate::config::Config;

use std::sync::Arc;

use global_hotkey::GlobalHotKeyManager;
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{Mutex, mpsc, watch};
use tracing::error;
use webcam_recorder_core::{
    Capabilities, CoreResult, WebcamRecorder,
    backends::gstreamer::{GstCaptureProvider, GstDeviceEnumerator, GstRecorderProvider},
};

/// Application entry point.
fn main() {
    // Moved into the event loop closure so the log file is flushed on exit.
    let log_guard = logging::init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager =
        match TrayManager::new(config.capture.selector_mode, config.capture.audio_enabled) {
            Ok(tm) => tm,
            Err(e) => {
                error!("Failed to create TrayManager: {:?}", e);
                std::process::exit(1);
            }
        };

    // Persists across event loop iterations; dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;
    let mut config = Some(config);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => {
                match cmd {
                    TrayCommand::Render(view) => {
                        if let Err(e) = tray_manager.render(&view) {
                            error!(error = ?e, "Failed to update tray menu");
                        }
                    }
                    TrayCommand::Shutdown => {
                        *control_flow = ControlFlow::ExitWithCode(0);
                    }
                }
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let Some(config) = config.take() else {
                    return;
                };

                let staging_dir = match Config::staging_dir() {
                    Ok(dir) => dir,
                    Err(e) => {
                        error!("Failed to resolve staging directory: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let capabilities = match gstreamer_capabilities() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to initialize GStreamer: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let recorder =
                    WebcamRecorder::new(capabilities, config.recorder_options(staging_dir));
                let recorder = Arc::new(Mutex::new(recorder));

                let download_dir = config.download_dir();
                let save_target = Arc::new(Mutex::new(save_dialog::save_target(
                    config.download.prompt,
                    download_dir.clone(),
                )));

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let (command_tx, command_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);

                // Register hotkey on the main thread; tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                let (manager, hotkey_id) = match HotkeyHandler::register_hotkey() {
                    Ok(pair) => pair,
                    Err(e) => {
                        error!("Failed to register hotkey: {:?}", e);
                        std::process::exit(1);
                    }
                };
                hotkey_manager = Some(manager);

                let tray_proxy = tray_proxy.clone();

                // TrayManager and hotkey_manager stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let hotkey_handler = HotkeyHandler::new(hotkey_id, command_tx);

                        let app = App {
                            recorder,
                            save_target,
                            notifier: Notifier::new(),
                            tray_proxy,
                            download_dir,
                            command_rx,
                            shutdown_tx,
                        };

                        tokio::join!(
                            async {
                                if let Err(e) = hotkey_handler.run(shutdown_rx).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            },
                            async {
                                if let Err(e) = app.run().await {
                                    error!(error = ?e, "App error");
                                }
                            }
                        );
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_manager and the log writer alive for the app's lifetime.
        let _ = (&hotkey_manager, &log_guard);
    });
}

fn gstreamer_capabilities() -> CoreResult<Capabilities> {
    Ok(Capabilities {
        capture: Box::new(GstCaptureProvider::new()?),
        recorders: Box::new(GstRecorderProvider::new()),
        devices: Box::new(GstDeviceEnumerator::new()?),
    })
}

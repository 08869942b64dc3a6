//! System tray icon and recorder controls.
//!
//! The tray menu is the recorder's UI: audio checkbox, camera selection,
//! capture toggle and download. It is redrawn from a `ControlsView` after
//! every command.

use crate::{AppError, AppResult, TrayIconState, menu_ids};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use tray_icon::menu::{CheckMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};
use webcam_recorder_core::{ControlsView, DeviceId, FacingMode, START_CAPTURE_LABEL, SelectorMode};

/// Text of the facing-mode toggle.
pub(crate) fn switch_camera_label(current: FacingMode) -> &'static str {
    match current {
        FacingMode::User => "Switch to Rear Camera",
        FacingMode::Environment => "Switch to Front Camera",
    }
}

/// Which camera control the menu offers.
enum CameraControl {
    Toggle(MenuItem),
    Devices {
        menu: Submenu,
        items: Vec<(DeviceId, CheckMenuItem)>,
    },
}

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    state: TrayIconState,
    audio_item: CheckMenuItem,
    camera: CameraControl,
    capture_item: MenuItem,
    download_item: MenuItem,
}

impl TrayManager {
    /// Create the tray icon with controls for `selector_mode`.
    #[track_caller]
    #[instrument]
    pub fn new(selector_mode: SelectorMode, audio_enabled: bool) -> AppResult<Self> {
        let menu = Menu::new();

        let audio_item =
            CheckMenuItem::with_id(menu_ids::AUDIO, "Record Audio", true, audio_enabled, None);
        append(&menu, &audio_item, "audio")?;

        let camera = match selector_mode {
            SelectorMode::FacingModeToggle => {
                let item = MenuItem::with_id(
                    menu_ids::SWITCH_CAMERA,
                    switch_camera_label(FacingMode::default()),
                    true,
                    None,
                );
                append(&menu, &item, "switch camera")?;
                CameraControl::Toggle(item)
            }
            SelectorMode::DeviceList => {
                let submenu = Submenu::with_id(menu_ids::CAMERA_MENU, "Camera", true);
                append(&menu, &submenu, "camera")?;
                CameraControl::Devices {
                    menu: submenu,
                    items: Vec::new(),
                }
            }
        };

        append(&menu, &PredefinedMenuItem::separator(), "separator")?;

        let capture_item = MenuItem::with_id(menu_ids::CAPTURE, START_CAPTURE_LABEL, true, None);
        append(&menu, &capture_item, "capture")?;

        let download_item = MenuItem::with_id(menu_ids::DOWNLOAD, "Download", false, None);
        append(&menu, &download_item, "download")?;

        let open_item = MenuItem::with_id(
            menu_ids::OPEN_DOWNLOADS,
            "Open Downloads Folder",
            true,
            None,
        );
        append(&menu, &open_item, "open downloads")?;

        append(&menu, &PredefinedMenuItem::separator(), "separator")?;

        let exit_item = MenuItem::with_id(menu_ids::EXIT, "Exit", true, None);
        append(&menu, &exit_item, "exit")?;

        let state = TrayIconState::Idle;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(state.tooltip())
            .with_menu(Box::new(menu))
            .with_icon(Self::load_icon(state)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(?selector_mode, "System tray icon initialized");

        Ok(Self {
            tray_icon,
            state,
            audio_item,
            camera,
            capture_item,
            download_item,
        })
    }

    /// Bring icon and menu in line with `view`.
    #[track_caller]
    #[instrument(skip(self, view), fields(capturing = view.capturing))]
    pub fn render(&mut self, view: &ControlsView) -> AppResult<()> {
        self.audio_item.set_checked(view.audio_enabled);
        self.capture_item.set_text(view.capture_label);
        self.download_item.set_enabled(view.download_available);

        match &mut self.camera {
            CameraControl::Toggle(item) => item.set_text(switch_camera_label(view.facing_mode)),
            CameraControl::Devices { menu, items } => {
                sync_device_items(menu, items, view)?;
            }
        }

        let state = TrayIconState::for_view(view);
        if state != self.state {
            self.update_state(state)?;
        }

        Ok(())
    }

    #[track_caller]
    fn update_state(&mut self, state: TrayIconState) -> AppResult<()> {
        self.tray_icon
            .set_icon(Some(Self::load_icon(state)?))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(state.tooltip()))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.state = state;
        debug!(?state, "Tray icon updated");

        Ok(())
    }

    /// Load icon from compile-time embedded PNG bytes.
    #[track_caller]
    fn load_icon(state: TrayIconState) -> AppResult<Icon> {
        let png_bytes: &[u8] = match state {
            TrayIconState::Idle => include_bytes!("../resources/icons/idle.png"),
            TrayIconState::Capturing => include_bytes!("../resources/icons/capturing.png"),
        };

        let img = image::load_from_memory(png_bytes).map_err(|e| AppError::TrayError {
            reason: format!("Failed to decode embedded icon: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let rgba = img.into_rgba8();
        let (width, height) = (rgba.width(), rgba.height());

        Icon::from_rgba(rgba.into_raw(), width, height).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// Rebuild the camera submenu when the device list changed, then move the check mark.
#[track_caller]
fn sync_device_items(
    menu: &Submenu,
    items: &mut Vec<(DeviceId, CheckMenuItem)>,
    view: &ControlsView,
) -> AppResult<()> {
    let unchanged = items.len() == view.devices.len()
        && items
            .iter()
            .zip(&view.devices)
            .all(|((id, _), device)| *id == device.device_id);

    if !unchanged {
        for (_, item) in items.drain(..) {
            menu.remove(&item).map_err(|e| AppError::TrayError {
                reason: format!("Failed to remove camera entry: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        for device in &view.devices {
            let label = if device.label.is_empty() {
                device.device_id.to_string()
            } else {
                device.label.clone()
            };
            let item = CheckMenuItem::with_id(
                menu_ids::device_item_id(&device.device_id),
                label,
                true,
                false,
                None,
            );
            menu.append(&item).map_err(|e| AppError::TrayError {
                reason: format!("Failed to add camera entry: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
            items.push((device.device_id.clone(), item));
        }

        menu.set_enabled(!items.is_empty());
        debug!(device_count = items.len(), "Camera menu rebuilt");
    }

    for (id, item) in items.iter() {
        item.set_checked(view.selected_device.as_ref() == Some(id));
    }

    Ok(())
}

#[track_caller]
fn append(menu: &Menu, item: &dyn tray_icon::menu::IsMenuItem, what: &str) -> AppResult<()> {
    menu.append(item).map_err(|e| AppError::TrayError {
        reason: format!("Failed to add {} menu item: {}", what, e),
        location: ErrorLocation::from(Location::caller()),
    })
}

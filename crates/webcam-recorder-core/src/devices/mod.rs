mod device_info;
mod facing;
mod selector;

pub use {
    device_info::{DeviceEnumerator, DeviceId, MediaDeviceInfo, MediaDeviceKind},
    facing::device_for_facing_mode,
    selector::DeviceSelector,
};

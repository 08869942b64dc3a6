use crate::{
    CaptureError, CoreResult, DeviceEnumerator, DeviceId, MediaDeviceInfo, MediaDeviceKind,
    backends::gstreamer::init,
};

use std::panic::Location;

use error_location::ErrorLocation;
use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::{debug, instrument};

/// Device properties that carry a stable identifier, most specific first.
const ID_PROPERTIES: &[&str] = &["object.serial", "api.v4l2.path", "device.path", "node.name"];

/// Enumerates devices through `gst::DeviceMonitor`.
#[derive(Debug)]
pub struct GstDeviceEnumerator {
    _private: (),
}

impl GstDeviceEnumerator {
    /// Initialize GStreamer and create the enumerator.
    #[track_caller]
    pub fn new() -> CoreResult<Self> {
        init()?;
        Ok(Self { _private: () })
    }

    /// Every device the monitor reports, with its GStreamer handle.
    #[track_caller]
    pub(crate) fn scan(&self) -> CoreResult<Vec<(MediaDeviceInfo, gst::Device)>> {
        let monitor = gst::DeviceMonitor::new();

        monitor.start().map_err(|e| CaptureError::DeviceError {
            reason: format!("Failed to start device monitor: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        let devices = monitor.devices();
        monitor.stop();

        Ok(devices
            .into_iter()
            .filter_map(|device| {
                let kind = kind_of(&device.device_class())?;
                let info = MediaDeviceInfo {
                    device_id: device_id_of(&device),
                    kind,
                    label: device.display_name().to_string(),
                };
                Some((info, device))
            })
            .collect())
    }
}

impl DeviceEnumerator for GstDeviceEnumerator {
    #[track_caller]
    #[instrument(skip(self))]
    fn enumerate_devices(&mut self) -> CoreResult<Vec<MediaDeviceInfo>> {
        let devices: Vec<MediaDeviceInfo> =
            self.scan()?.into_iter().map(|(info, _)| info).collect();

        debug!(device_count = devices.len(), "GStreamer devices scanned");

        Ok(devices)
    }
}

fn kind_of(device_class: &str) -> Option<MediaDeviceKind> {
    if device_class.contains("Video/Source") {
        Some(MediaDeviceKind::VideoInput)
    } else if device_class.contains("Audio/Source") {
        Some(MediaDeviceKind::AudioInput)
    } else if device_class.contains("Audio/Sink") {
        Some(MediaDeviceKind::AudioOutput)
    } else {
        None
    }
}

fn device_id_of(device: &gst::Device) -> DeviceId {
    let from_properties = device.properties().and_then(|props| {
        ID_PROPERTIES.iter().find_map(|key| {
            let value = props.value(key).ok()?;
            value
                .get::<String>()
                .ok()
                .or_else(|| value.get::<u64>().ok().map(|n| n.to_string()))
                .or_else(|| value.get::<i64>().ok().map(|n| n.to_string()))
        })
    });

    match from_properties {
        Some(id) => DeviceId::new(id),
        None => DeviceId::new(device.display_name().to_string()),
    }
}

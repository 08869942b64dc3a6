use crate::CoreResult;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque platform identifier of a media device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Wrap a platform identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of media device as reported by enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaDeviceKind {
    /// Microphone or other audio source.
    AudioInput,
    /// Speaker or other audio sink.
    AudioOutput,
    /// Camera or other video source.
    VideoInput,
}

/// One enumerated media device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDeviceInfo {
    /// Platform identifier.
    pub device_id: DeviceId,
    /// Device kind.
    pub kind: MediaDeviceKind,
    /// Human readable name, may be empty.
    pub label: String,
}

/// Lists every media device the platform knows about.
pub trait DeviceEnumerator: Send {
    /// All devices of all kinds, in platform order.
    fn enumerate_devices(&mut self) -> CoreResult<Vec<MediaDeviceInfo>>;
}

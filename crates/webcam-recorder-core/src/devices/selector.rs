use crate::{CoreResult, DeviceEnumerator, DeviceId, MediaDeviceInfo, MediaDeviceKind};

use tracing::{debug, info, instrument};

/// The list of video inputs, populated once.
#[derive(Debug, Default)]
pub struct DeviceSelector {
    devices: Vec<MediaDeviceInfo>,
    enumerated: bool,
}

impl DeviceSelector {
    /// Empty selector; call [`enumerate`](Self::enumerate) to populate it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the list with the platform's video inputs.
    ///
    /// Runs the enumerator only on the first call; later calls keep the
    /// existing list. Platform order is preserved.
    #[track_caller]
    #[instrument(skip(self, enumerator))]
    pub fn enumerate(
        &mut self,
        enumerator: &mut dyn DeviceEnumerator,
    ) -> CoreResult<&[MediaDeviceInfo]> {
        if self.enumerated {
            debug!(
                device_count = self.devices.len(),
                "Devices already enumerated"
            );
            return Ok(&self.devices);
        }

        let all = enumerator.enumerate_devices()?;
        let total = all.len();

        self.devices = all
            .into_iter()
            .filter(|d| d.kind == MediaDeviceKind::VideoInput)
            .collect();
        self.enumerated = true;

        info!(
            total,
            video_inputs = self.devices.len(),
            "Video input devices enumerated"
        );

        Ok(&self.devices)
    }

    /// Video inputs in platform order.
    pub fn devices(&self) -> &[MediaDeviceInfo] {
        &self.devices
    }

    /// Whether enumeration already ran.
    pub fn is_enumerated(&self) -> bool {
        self.enumerated
    }

    /// Look up a video input by id.
    pub fn find(&self, device_id: &DeviceId) -> Option<&MediaDeviceInfo> {
        self.devices.iter().find(|d| &d.device_id == device_id)
    }
}

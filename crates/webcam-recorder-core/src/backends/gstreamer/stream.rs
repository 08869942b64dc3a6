use crate::{
    CameraConstraint, CaptureConstraints, CaptureError, CaptureProvider, CoreResult,
    MediaDeviceKind, MediaStream,
    backends::gstreamer::{GstDeviceEnumerator, make_element, play_checked},
    device_for_facing_mode,
};

use std::{
    any::Any,
    panic::Location,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use error_location::ErrorLocation;
use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// Opens camera streams as live GStreamer preview pipelines.
#[derive(Debug)]
pub struct GstCaptureProvider {
    enumerator: GstDeviceEnumerator,
}

impl GstCaptureProvider {
    /// Initialize GStreamer and create the provider.
    #[track_caller]
    pub fn new() -> CoreResult<Self> {
        Ok(Self {
            enumerator: GstDeviceEnumerator::new()?,
        })
    }

    #[track_caller]
    fn resolve_camera(&self, camera: &CameraConstraint) -> CoreResult<gst::Device> {
        let caller = Location::caller();
        let (infos, devices): (Vec<_>, Vec<_>) = self
            .enumerator
            .scan()?
            .into_iter()
            .filter(|(info, _)| info.kind == MediaDeviceKind::VideoInput)
            .unzip();

        let chosen = match camera {
            CameraConstraint::Device(id) => {
                let found = infos.iter().position(|info| &info.device_id == id);
                found.ok_or_else(|| CaptureError::DeviceNotFound {
                    device_id: id.to_string(),
                    location: ErrorLocation::from(caller),
                })?
            }
            CameraConstraint::FacingMode(mode) => device_for_facing_mode(&infos, *mode)
                .and_then(|info| infos.iter().position(|i| i == info))
                .ok_or_else(|| CaptureError::NoStreamAvailable {
                    location: ErrorLocation::from(caller),
                })?,
        };

        debug!(
            device_id = %infos[chosen].device_id,
            label = %infos[chosen].label,
            "Camera resolved"
        );

        devices
            .into_iter()
            .nth(chosen)
            .ok_or_else(|| CaptureError::NoStreamAvailable {
                location: ErrorLocation::from(caller),
            })
    }
}

impl CaptureProvider for GstCaptureProvider {
    #[track_caller]
    #[instrument(skip(self))]
    fn open(&mut self, constraints: &CaptureConstraints) -> CoreResult<Arc<dyn MediaStream>> {
        let device = self.resolve_camera(&constraints.camera)?;
        let stream = GstMediaStream::new(device, constraints.clone())?;
        stream.resume_preview()?;
        Ok(Arc::new(stream))
    }
}

/// A camera feed kept alive by a preview pipeline.
///
/// The preview owns the device. Recorders call
/// [`suspend_preview`](Self::suspend_preview) before opening the device
/// themselves and [`resume_preview`](Self::resume_preview) when done.
#[derive(Debug)]
pub struct GstMediaStream {
    id: String,
    device: gst::Device,
    constraints: CaptureConstraints,
    preview: Mutex<Option<gst::Pipeline>>,
    stopped: AtomicBool,
}

impl GstMediaStream {
    fn new(device: gst::Device, constraints: CaptureConstraints) -> CoreResult<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            device,
            constraints,
            preview: Mutex::new(None),
            stopped: AtomicBool::new(false),
        })
    }

    /// Source element for this stream's camera.
    #[track_caller]
    pub(crate) fn create_video_source(&self) -> CoreResult<gst::Element> {
        self.device
            .create_element(None)
            .map_err(|e| CaptureError::DeviceError {
                reason: format!("Failed to create camera source: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// `videoconvert ! videoscale ! capsfilter` sized to the constraints.
    #[track_caller]
    pub(crate) fn create_video_chain(&self) -> CoreResult<[gst::Element; 3]> {
        let caps = gst::Caps::builder("video/x-raw")
            .field("width", caps_dimension("width", self.constraints.width)?)
            .field("height", caps_dimension("height", self.constraints.height)?)
            .build();

        let capsfilter = gst::ElementFactory::make("capsfilter")
            .property("caps", &caps)
            .build()
            .map_err(|e| CaptureError::DeviceError {
                reason: format!("Failed to create capsfilter: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok([
            make_element("videoconvert")?,
            make_element("videoscale")?,
            capsfilter,
        ])
    }

    #[track_caller]
    fn build_preview(&self) -> CoreResult<gst::Pipeline> {
        let caller = Location::caller();
        let pipeline = gst::Pipeline::new();

        let source = self.create_video_source()?;
        let [convert, scale, capsfilter] = self.create_video_chain()?;
        let sink = make_element("fakesink")?;

        let link_error = |what: &str| CaptureError::DeviceError {
            reason: format!("Failed to link preview {}", what),
            location: ErrorLocation::from(caller),
        };

        pipeline
            .add_many([&source, &convert, &scale, &capsfilter, &sink])
            .map_err(|_| link_error("video elements"))?;
        gst::Element::link_many([&source, &convert, &scale, &capsfilter, &sink])
            .map_err(|_| link_error("video chain"))?;

        if self.constraints.audio {
            let audio_source = make_element("autoaudiosrc")?;
            let audio_sink = make_element("fakesink")?;
            pipeline
                .add_many([&audio_source, &audio_sink])
                .map_err(|_| link_error("audio elements"))?;
            audio_source
                .link(&audio_sink)
                .map_err(|_| link_error("audio chain"))?;
        }

        Ok(pipeline)
    }

    /// Release the device so a recorder can open it.
    pub(crate) fn suspend_preview(&self) {
        let mut preview = self.preview.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pipeline) = preview.take() {
            let _ = pipeline.set_state(gst::State::Null);
            debug!(stream_id = %self.id, "Preview suspended");
        }
    }

    /// Start (or restart) the preview unless the stream was stopped.
    #[track_caller]
    pub(crate) fn resume_preview(&self) -> CoreResult<()> {
        if self.stopped.load(Ordering::Acquire) {
            return Ok(());
        }

        let mut preview = self.preview.lock().unwrap_or_else(|e| e.into_inner());
        if preview.is_some() {
            return Ok(());
        }

        let pipeline = self.build_preview()?;
        play_checked(&pipeline)?;
        *preview = Some(pipeline);

        info!(stream_id = %self.id, "Preview running");

        Ok(())
    }
}

/// Caps carry sizes as signed 32-bit integers.
#[track_caller]
fn caps_dimension(name: &str, value: u32) -> CoreResult<i32> {
    i32::try_from(value).map_err(|_| CaptureError::InvalidConstraints {
        reason: format!("{} {} does not fit video caps", name, value),
        location: ErrorLocation::from(Location::caller()),
    })
}

impl MediaStream for GstMediaStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn constraints(&self) -> &CaptureConstraints {
        &self.constraints
    }

    fn stop_tracks(&self) {
        self.stopped.store(true, Ordering::Release);
        self.suspend_preview();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GstMediaStream {
    fn drop(&mut self) {
        let preview = self.preview.get_mut().unwrap_or_else(|e| e.into_inner());
        if let Some(pipeline) = preview.take()
            && pipeline.set_state(gst::State::Null).is_err()
        {
            error!(stream_id = %self.id, "Failed to stop preview pipeline");
        }
    }
}

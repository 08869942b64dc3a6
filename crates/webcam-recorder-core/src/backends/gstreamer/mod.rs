//! GStreamer implementations of the boundary capabilities.
//!
//! - [`GstDeviceEnumerator`]: `gst::DeviceMonitor` based enumeration
//! - [`GstCaptureProvider`]: live preview pipeline per stream
//! - [`GstRecorderProvider`]: VP8/Vorbis WebM recording into an appsink

mod devices;
mod recorder;
mod stream;

pub use {
    devices::GstDeviceEnumerator, recorder::GstRecorderProvider, stream::GstCaptureProvider,
    stream::GstMediaStream,
};

use crate::{CaptureError, CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::{error, warn};

/// How long to wait for a pipeline to report a startup error.
const STARTUP_CHECK_MS: u64 = 500;

#[track_caller]
pub(crate) fn init() -> CoreResult<()> {
    gst::init().map_err(|e| CaptureError::DeviceError {
        reason: format!("Failed to initialize GStreamer: {}", e),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
pub(crate) fn make_element(factory: &str) -> CoreResult<gst::Element> {
    gst::ElementFactory::make(factory)
        .build()
        .map_err(|e| CaptureError::DeviceError {
            reason: format!("Failed to create {}: {}", factory, e),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Set `pipeline` playing and surface the first error it posts.
#[track_caller]
pub(crate) fn play_checked(pipeline: &gst::Pipeline) -> CoreResult<()> {
    let caller = Location::caller();

    pipeline
        .set_state(gst::State::Playing)
        .map_err(|e| CaptureError::DeviceError {
            reason: format!("Failed to start pipeline: {}", e),
            location: ErrorLocation::from(caller),
        })?;

    let Some(bus) = pipeline.bus() else {
        return Ok(());
    };

    if let Some(msg) = bus.timed_pop_filtered(
        gst::ClockTime::from_mseconds(STARTUP_CHECK_MS),
        &[gst::MessageType::Error, gst::MessageType::Warning],
    ) {
        match msg.view() {
            gst::MessageView::Error(err) => {
                error!(
                    error = %err.error(),
                    debug = ?err.debug(),
                    source = ?err.src().map(|s| s.name()),
                    "GStreamer error during start"
                );
                let _ = pipeline.set_state(gst::State::Null);

                let glib_error = err.error();
                let reason = glib_error.to_string();
                if glib_error.matches(gst::ResourceError::NotAuthorized) {
                    return Err(CaptureError::PermissionDenied {
                        reason,
                        location: ErrorLocation::from(caller),
                    });
                }
                return Err(CaptureError::DeviceError {
                    reason,
                    location: ErrorLocation::from(caller),
                });
            }
            gst::MessageView::Warning(w) => {
                warn!(
                    warning = %w.error(),
                    debug = ?w.debug(),
                    source = ?w.src().map(|s| s.name()),
                    "GStreamer warning during start"
                );
            }
            _ => {}
        }
    }

    Ok(())
}

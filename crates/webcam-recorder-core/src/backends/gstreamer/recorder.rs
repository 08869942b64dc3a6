use crate::{
    CaptureError, ChunkSink, CoreResult, MediaRecorder, MediaStream, RecorderProvider,
    WEBM_MIME_TYPE,
    backends::gstreamer::{GstMediaStream, make_element, play_checked},
};

use std::{panic::Location, sync::Arc};

use error_location::ErrorLocation;
use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use tracing::{debug, error, info, instrument, warn};

/// Upper bound for the muxer to flush after EOS.
const FINALIZE_TIMEOUT_SECS: u64 = 5;

/// Creates VP8/Vorbis WebM recorders for [`GstMediaStream`]s.
#[derive(Debug, Default)]
pub struct GstRecorderProvider {
    _private: (),
}

impl GstRecorderProvider {
    /// Create the provider.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecorderProvider for GstRecorderProvider {
    #[track_caller]
    #[instrument(skip(self, stream, sink))]
    fn create(
        &mut self,
        stream: &Arc<dyn MediaStream>,
        mime_type: &str,
        sink: ChunkSink,
    ) -> CoreResult<Box<dyn MediaRecorder>> {
        if mime_type != WEBM_MIME_TYPE {
            return Err(CaptureError::Recorder {
                reason: format!("Unsupported container type {}", mime_type),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let gst_stream = gst_stream(stream)?;
        let pipeline = build_pipeline(gst_stream, sink)?;

        debug!(stream_id = stream.id(), "Recorder pipeline built");

        Ok(Box::new(GstRecorder {
            stream: Arc::clone(stream),
            pipeline,
            running: false,
        }))
    }
}

/// Records one stream into an appsink, one chunk per muxer buffer.
struct GstRecorder {
    stream: Arc<dyn MediaStream>,
    pipeline: gst::Pipeline,
    running: bool,
}

impl MediaRecorder for GstRecorder {
    #[track_caller]
    #[instrument(skip(self))]
    fn start(&mut self) -> CoreResult<()> {
        let gst_stream = gst_stream(&self.stream)?;

        // The preview holds the camera; hand it over to the recorder.
        gst_stream.suspend_preview();

        if let Err(e) = play_checked(&self.pipeline) {
            if let Err(resume) = gst_stream.resume_preview() {
                warn!(error = ?resume, "Failed to resume preview after recorder error");
            }
            return Err(CaptureError::Recorder {
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.running = true;
        info!(stream_id = self.stream.id(), "Recorder running");

        Ok(())
    }

    #[track_caller]
    #[instrument(skip(self))]
    fn stop(&mut self) -> CoreResult<()> {
        if !self.running {
            return Ok(());
        }
        self.running = false;

        if !self.pipeline.send_event(gst::event::Eos::new()) {
            warn!("Failed to send EOS to recorder pipeline");
        }

        let mut result = Ok(());

        if let Some(bus) = self.pipeline.bus()
            && let Some(msg) = bus.timed_pop_filtered(
                gst::ClockTime::from_seconds(FINALIZE_TIMEOUT_SECS),
                &[gst::MessageType::Eos, gst::MessageType::Error],
            )
            && let gst::MessageView::Error(err) = msg.view()
        {
            error!(
                error = %err.error(),
                debug = ?err.debug(),
                "Recorder failed while finalizing"
            );
            result = Err(CaptureError::Recorder {
                reason: err.error().to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Err(e) = self.pipeline.set_state(gst::State::Null) {
            warn!(error = %e, "Failed to reset recorder pipeline");
        }

        let gst_stream = gst_stream(&self.stream)?;
        gst_stream.resume_preview()?;

        info!(stream_id = self.stream.id(), "Recorder finalized");

        result
    }
}

impl Drop for GstRecorder {
    fn drop(&mut self) {
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}

#[track_caller]
fn gst_stream(stream: &Arc<dyn MediaStream>) -> CoreResult<&GstMediaStream> {
    stream
        .as_any()
        .downcast_ref::<GstMediaStream>()
        .ok_or_else(|| CaptureError::Recorder {
            reason: "Stream was not opened by the GStreamer backend".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// `camera ! convert ! scale ! caps ! queue ! vp8enc ! webmmux ! appsink`,
/// plus `autoaudiosrc ! queue ! audioconvert ! audioresample ! vorbisenc`
/// into the muxer when the stream has audio.
#[track_caller]
fn build_pipeline(stream: &GstMediaStream, sink: ChunkSink) -> CoreResult<gst::Pipeline> {
    let caller = Location::caller();
    let link_error = |what: &str| CaptureError::Recorder {
        reason: format!("Failed to link recorder {}", what),
        location: ErrorLocation::from(caller),
    };

    let pipeline = gst::Pipeline::new();

    let source = stream.create_video_source()?;
    let [convert, scale, capsfilter] = stream.create_video_chain()?;
    let video_queue = make_element("queue")?;

    let encoder = gst::ElementFactory::make("vp8enc")
        .property("deadline", 1i64)
        .build()
        .map_err(|e| CaptureError::Recorder {
            reason: format!("Failed to create vp8enc: {}", e),
            location: ErrorLocation::from(caller),
        })?;

    // Not seekable: the muxer writes a live stream into the appsink.
    let muxer = gst::ElementFactory::make("webmmux")
        .property("streamable", true)
        .build()
        .map_err(|e| CaptureError::Recorder {
            reason: format!("Failed to create webmmux: {}", e),
            location: ErrorLocation::from(caller),
        })?;

    let appsink = make_element("appsink")?
        .dynamic_cast::<gst_app::AppSink>()
        .map_err(|_| CaptureError::Recorder {
            reason: "Failed to cast to AppSink".to_string(),
            location: ErrorLocation::from(caller),
        })?;
    appsink.set_property("sync", false);

    appsink.set_callbacks(
        gst_app::AppSinkCallbacks::builder()
            .new_sample(move |appsink| {
                let sample = appsink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                let buffer = sample.buffer().ok_or(gst::FlowError::Error)?;
                let map = buffer.map_readable().map_err(|_| gst::FlowError::Error)?;
                sink.deliver(map.as_slice().to_vec());
                Ok(gst::FlowSuccess::Ok)
            })
            .build(),
    );

    pipeline
        .add_many([
            &source,
            &convert,
            &scale,
            &capsfilter,
            &video_queue,
            &encoder,
            &muxer,
            appsink.upcast_ref::<gst::Element>(),
        ])
        .map_err(|_| link_error("video elements"))?;

    gst::Element::link_many([
        &source,
        &convert,
        &scale,
        &capsfilter,
        &video_queue,
        &encoder,
        &muxer,
        appsink.upcast_ref::<gst::Element>(),
    ])
    .map_err(|_| link_error("video chain"))?;

    if stream.has_audio() {
        let audio_elements = [
            make_element("autoaudiosrc")?,
            make_element("queue")?,
            make_element("audioconvert")?,
            make_element("audioresample")?,
            make_element("vorbisenc")?,
        ];

        pipeline
            .add_many(&audio_elements)
            .map_err(|_| link_error("audio elements"))?;
        gst::Element::link_many(&audio_elements).map_err(|_| link_error("audio chain"))?;
        if let Some(encoder) = audio_elements.last() {
            encoder
                .link(&muxer)
                .map_err(|_| link_error("audio encoder to muxer"))?;
        }
    }

    Ok(pipeline)
}

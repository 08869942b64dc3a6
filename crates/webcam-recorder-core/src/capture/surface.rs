use crate::{CaptureConstraints, CoreResult};

use std::{any::Any, sync::Arc};

use tracing::{debug, info, instrument};

/// A live camera (and optionally microphone) feed.
pub trait MediaStream: Send + Sync {
    /// Identifier of this stream, unique per open.
    fn id(&self) -> &str;

    /// Constraints the stream was opened with.
    fn constraints(&self) -> &CaptureConstraints;

    /// Whether the stream carries a microphone track.
    fn has_audio(&self) -> bool {
        self.constraints().audio
    }

    /// Stop every track. The stream is unusable afterwards.
    fn stop_tracks(&self);

    /// Access to the concrete stream for recorders of the same backend.
    fn as_any(&self) -> &dyn Any;
}

/// Opens live streams for a set of constraints.
pub trait CaptureProvider: Send {
    /// Negotiate a stream matching `constraints`.
    fn open(&mut self, constraints: &CaptureConstraints) -> CoreResult<Arc<dyn MediaStream>>;
}

/// Holds the current stream and reopens it whenever the constraints change.
pub struct CaptureSurface {
    provider: Box<dyn CaptureProvider>,
    stream: Option<Arc<dyn MediaStream>>,
}

impl CaptureSurface {
    /// Wrap a provider. No stream is opened until [`configure`](Self::configure).
    pub fn new(provider: Box<dyn CaptureProvider>) -> Self {
        Self {
            provider,
            stream: None,
        }
    }

    /// The live stream, if one is open.
    pub fn stream(&self) -> Option<&Arc<dyn MediaStream>> {
        self.stream.as_ref()
    }

    /// Apply `constraints`, reopening the stream unless it already matches.
    ///
    /// On failure the previous stream is already released and no stream is
    /// available until the next successful call.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn configure(&mut self, constraints: &CaptureConstraints) -> CoreResult<()> {
        if let Some(stream) = &self.stream
            && stream.constraints() == constraints
        {
            debug!(stream_id = stream.id(), "Constraints unchanged");
            return Ok(());
        }

        self.release();

        let stream = self.provider.open(constraints)?;

        info!(
            stream_id = stream.id(),
            audio = stream.has_audio(),
            "Capture stream opened"
        );

        self.stream = Some(stream);

        Ok(())
    }

    /// Stop all tracks of the current stream and forget it.
    #[instrument(skip(self))]
    pub fn release(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.stop_tracks();
            debug!(stream_id = stream.id(), "Capture stream released");
        }
    }
}

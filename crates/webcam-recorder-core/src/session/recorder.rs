use crate::{ChunkSink, CoreResult, MediaStream};

use std::sync::Arc;

/// Container media type of every recording.
pub const WEBM_MIME_TYPE: &str = "video/webm";

/// An encoder bound to one stream, emitting chunks through its [`ChunkSink`].
pub trait MediaRecorder: Send {
    /// Begin recording.
    fn start(&mut self) -> CoreResult<()>;

    /// Ask the recorder to finalize. A last chunk may still arrive afterwards.
    fn stop(&mut self) -> CoreResult<()>;
}

/// Creates recorders for live streams.
pub trait RecorderProvider: Send {
    /// Bind a new recorder to `stream`, producing `mime_type` chunks into `sink`.
    fn create(
        &mut self,
        stream: &Arc<dyn MediaStream>,
        mime_type: &str,
        sink: ChunkSink,
    ) -> CoreResult<Box<dyn MediaRecorder>>;
}

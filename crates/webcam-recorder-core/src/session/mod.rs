mod chunks;
mod recorder;
#[allow(clippy::module_inception)]
mod session;

pub use {
    chunks::{Chunk, ChunkBuffer, ChunkSink},
    recorder::{MediaRecorder, RecorderProvider, WEBM_MIME_TYPE},
    session::{RecordingSession, SessionState},
};

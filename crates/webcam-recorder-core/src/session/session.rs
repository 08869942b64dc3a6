use crate::{CaptureError, ChunkBuffer, CoreResult, MediaRecorder, MediaStream, RecorderProvider};

use std::{panic::Location, sync::Arc, time::Instant};

use error_location::ErrorLocation;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Recording state of a [`RecordingSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No recorder exists.
    Idle,
    /// A recorder is bound to the stream and producing chunks.
    Capturing {
        /// When recording started.
        started_at: Instant,
        /// Unique session ID for log correlation.
        session_id: Uuid,
    },
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Capturing { .. } => "capturing",
        }
    }
}

/// Start/stop state machine around one recorder at a time.
///
/// A recorder exists exactly while the state is [`SessionState::Capturing`].
/// Chunks accumulate in arrival order and are kept across start/stop cycles
/// until the owner clears them.
pub struct RecordingSession {
    provider: Box<dyn RecorderProvider>,
    mime_type: &'static str,
    state: SessionState,
    recorder: Option<Box<dyn MediaRecorder>>,
    chunks: ChunkBuffer,
}

impl RecordingSession {
    /// Create an idle session recording `mime_type` through `provider`.
    pub fn new(provider: Box<dyn RecorderProvider>, mime_type: &'static str) -> Self {
        Self {
            provider,
            mime_type,
            state: SessionState::Idle,
            recorder: None,
            chunks: ChunkBuffer::new(),
        }
    }

    /// Bind a new recorder to `stream` and start it.
    ///
    /// # Errors
    ///
    /// `InvalidState` if already capturing, `NoStreamAvailable` without a
    /// stream, or the provider's error if the recorder cannot be created or
    /// started. The session stays idle on every error.
    #[track_caller]
    #[instrument(skip(self, stream))]
    pub fn start(&mut self, stream: Option<&Arc<dyn MediaStream>>) -> CoreResult<Uuid> {
        if let SessionState::Capturing { .. } = self.state {
            return Err(CaptureError::InvalidState {
                operation: "start capture",
                state: self.state.name(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let stream = stream.ok_or_else(|| CaptureError::NoStreamAvailable {
            location: ErrorLocation::from(Location::caller()),
        })?;

        let sink = self.chunks.next_sink();
        let mut recorder = self.provider.create(stream, self.mime_type, sink)?;
        recorder.start()?;

        let session_id = Uuid::new_v4();
        self.recorder = Some(recorder);
        self.state = SessionState::Capturing {
            started_at: Instant::now(),
            session_id,
        };

        info!(
            session_id = %session_id,
            stream_id = stream.id(),
            mime_type = self.mime_type,
            "Capture started"
        );

        Ok(session_id)
    }

    /// Ask the recorder to finalize and return to idle.
    ///
    /// Does not wait for a trailing chunk; one may still be appended after
    /// this returns.
    ///
    /// # Errors
    ///
    /// `InvalidState` if idle. A recorder failure is returned after the
    /// session has already moved to idle and released the recorder.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CoreResult<()> {
        let SessionState::Capturing {
            started_at,
            session_id,
        } = self.state
        else {
            return Err(CaptureError::InvalidState {
                operation: "stop capture",
                state: self.state.name(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let result = match self.recorder.take() {
            Some(mut recorder) => recorder.stop(),
            None => Ok(()),
        };
        self.state = SessionState::Idle;

        if let Err(e) = &result {
            warn!(session_id = %session_id, error = ?e, "Recorder failed to finalize");
        }

        info!(
            session_id = %session_id,
            duration_ms = started_at.elapsed().as_millis(),
            chunk_count = self.chunks.len(),
            "Capture stopped"
        );

        result
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a recorder is active.
    pub fn is_capturing(&self) -> bool {
        matches!(self.state, SessionState::Capturing { .. })
    }

    /// Whether a recorder handle is held.
    pub fn has_recorder(&self) -> bool {
        self.recorder.is_some()
    }

    /// Accumulated chunks.
    pub fn chunks(&self) -> &ChunkBuffer {
        &self.chunks
    }
}

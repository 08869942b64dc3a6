use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{error, trace};

/// One unit of encoded media data delivered by a recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk(Vec<u8>);

impl Chunk {
    /// Wrap encoded bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the chunk carries no data.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Bytes of `chunks` joined in order.
    pub fn concat(chunks: &[Chunk]) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(chunks.iter().map(Chunk::len).sum());
        for chunk in chunks {
            bytes.extend_from_slice(chunk.as_bytes());
        }
        bytes
    }
}

#[derive(Debug, Default)]
struct ChunkState {
    chunks: Vec<Chunk>,
    /// Generation of the most recently started recorder.
    generation: u64,
}

/// Append-only sequence of chunks shared between the session and its recorders.
#[derive(Debug, Clone, Default)]
pub struct ChunkBuffer {
    state: Arc<Mutex<ChunkState>>,
}

impl ChunkBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ChunkState> {
        // A poisoned lock still holds a valid chunk list.
        self.state.lock().unwrap_or_else(|e| {
            error!("Chunk buffer lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }

    /// Open a new generation and return a sink bound to it.
    ///
    /// Sinks from earlier generations stop admitting chunks from here on.
    pub(crate) fn next_sink(&self) -> ChunkSink {
        let mut state = self.lock();
        state.generation += 1;
        ChunkSink {
            buffer: self.clone(),
            generation: state.generation,
        }
    }

    /// Number of accumulated chunks.
    pub fn len(&self) -> usize {
        self.lock().chunks.len()
    }

    /// Whether no chunk has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.lock().chunks.is_empty()
    }

    /// Sum of all chunk sizes.
    pub fn total_bytes(&self) -> usize {
        self.lock().chunks.iter().map(Chunk::len).sum()
    }

    /// Copy of the chunks in arrival order.
    pub fn snapshot(&self) -> Vec<Chunk> {
        self.lock().chunks.clone()
    }

    /// All chunks concatenated in arrival order.
    pub fn concat(&self) -> Vec<u8> {
        Chunk::concat(&self.lock().chunks)
    }

    /// Drop the oldest `count` chunks, keeping anything that arrived later.
    pub(crate) fn discard_front(&self, count: usize) {
        let mut state = self.lock();
        let count = count.min(state.chunks.len());
        state.chunks.drain(..count);
    }
}

/// Chunk-received callback handed to a recorder.
///
/// Safe to call from any thread, any number of times, including after the
/// recorder was asked to stop.
#[derive(Debug, Clone)]
pub struct ChunkSink {
    buffer: ChunkBuffer,
    generation: u64,
}

impl ChunkSink {
    /// Append `data` to the session's chunk sequence.
    ///
    /// Zero-size data is ignored, as is data from a recorder that has been
    /// superseded by a newer one. Returns whether the chunk was appended.
    pub fn deliver(&self, data: Vec<u8>) -> bool {
        if data.is_empty() {
            trace!(generation = self.generation, "Ignoring empty chunk");
            return false;
        }

        let mut state = self.buffer.lock();

        if state.generation != self.generation {
            trace!(
                generation = self.generation,
                current = state.generation,
                bytes = data.len(),
                "Dropping chunk from superseded recorder"
            );
            return false;
        }

        state.chunks.push(Chunk::new(data));
        true
    }

    /// Generation this sink belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

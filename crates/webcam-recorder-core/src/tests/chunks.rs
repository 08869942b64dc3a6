use crate::{Chunk, ChunkBuffer};

use std::sync::Arc;

/// WHAT: Zero-size chunks are never admitted
/// WHY: Recorders emit empty buffers that must not show up as data
#[test]
fn given_empty_data_when_delivered_then_buffer_unchanged() {
    // Given: A sink for the current generation
    let buffer = ChunkBuffer::new();
    let sink = buffer.next_sink();

    // When: Delivering an empty chunk
    let admitted = sink.deliver(Vec::new());

    // Then: Nothing is appended
    assert!(!admitted);
    assert!(buffer.is_empty());
}

/// WHAT: Chunks from a superseded recorder are dropped
/// WHY: A late chunk from an old recording must not interleave with a newer one
#[test]
fn given_newer_generation_when_old_sink_delivers_then_chunk_dropped() {
    // Given: Two successive sinks
    let buffer = ChunkBuffer::new();
    let old = buffer.next_sink();
    let new = buffer.next_sink();
    new.deliver(vec![1, 2, 3]);

    // When: The old sink delivers late
    let admitted = old.deliver(vec![9, 9]);

    // Then: Only the newer chunk is kept
    assert!(!admitted);
    assert_eq!(buffer.concat(), vec![1, 2, 3]);
    assert_eq!(old.generation() + 1, new.generation());
}

/// WHAT: Chunks keep arrival order and discard_front keeps later arrivals
/// WHY: A chunk landing during a download must survive for the next one
#[test]
fn given_chunks_when_discarding_prefix_then_later_chunks_kept() {
    // Given: Three chunks in arrival order
    let buffer = ChunkBuffer::new();
    let sink = buffer.next_sink();
    for data in [vec![1u8], vec![2, 2], vec![3, 3, 3]] {
        sink.deliver(data);
    }
    assert_eq!(buffer.total_bytes(), 6);

    // When: Discarding the first two
    buffer.discard_front(2);

    // Then: Only the third remains
    let remaining = buffer.snapshot();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].as_bytes(), &[3, 3, 3]);
}

/// WHAT: Concurrent deliveries from one sink are all kept
/// WHY: Backends deliver from their own streaming threads
#[test]
fn given_concurrent_deliveries_when_joined_then_every_chunk_counted() {
    // Given: One sink shared by four threads
    let buffer = ChunkBuffer::new();
    let sink = Arc::new(buffer.next_sink());

    // When: Each thread delivers 250 one-byte chunks
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let sink = Arc::clone(&sink);
            std::thread::spawn(move || {
                for _ in 0..250 {
                    sink.deliver(vec![i]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // Then: All 1000 chunks are present
    assert_eq!(buffer.len(), 1000);
    assert_eq!(buffer.total_bytes(), 1000);
}

/// WHAT: Joining a snapshot gives the same bytes as joining the live buffer
/// WHY: Downloads assemble from a snapshot while the buffer keeps growing
#[test]
fn given_snapshot_when_concatenated_then_matches_buffer_bytes() {
    // Given: Chunks of uneven size
    let buffer = ChunkBuffer::new();
    let sink = buffer.next_sink();
    for data in [vec![0x1A, 0x45], vec![0xDF], vec![0xA3, 0x01, 0x02]] {
        sink.deliver(data);
    }

    // When: Joining a snapshot
    let joined = Chunk::concat(&buffer.snapshot());

    // Then: Arrival order is preserved and nothing is dropped
    assert_eq!(joined, vec![0x1A, 0x45, 0xDF, 0xA3, 0x01, 0x02]);
    assert_eq!(joined, buffer.concat());
    assert!(Chunk::concat(&[]).is_empty());
}

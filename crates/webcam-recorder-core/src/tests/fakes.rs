//! Test doubles for the boundary capabilities.

use crate::{
    CaptureConstraints, CaptureError, CaptureProvider, ChunkSink, CoreResult, DeviceEnumerator,
    DeviceId, MediaDeviceInfo, MediaDeviceKind, MediaRecorder, MediaStream, RecorderProvider,
    SaveOutcome, SaveTarget, StagedArtifact,
};

use std::{
    any::Any,
    fs,
    panic::Location,
    path::PathBuf,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use error_location::ErrorLocation;
use uuid::Uuid;

pub(crate) fn temp_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("webcam-recorder-{}-{}", label, Uuid::new_v4()))
}

pub(crate) struct FakeStream {
    id: String,
    pub(crate) constraints: CaptureConstraints,
    pub(crate) stopped: AtomicBool,
}

impl MediaStream for FakeStream {
    fn id(&self) -> &str {
        &self.id
    }

    fn constraints(&self) -> &CaptureConstraints {
        &self.constraints
    }

    fn stop_tracks(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Shared view of everything a [`FakeCaptureProvider`] opened.
#[derive(Clone, Default)]
pub(crate) struct FakeCapture {
    pub(crate) streams: Arc<Mutex<Vec<Arc<FakeStream>>>>,
    pub(crate) fail: Arc<AtomicBool>,
}

impl FakeCapture {
    pub(crate) fn provider(&self) -> Box<dyn CaptureProvider> {
        Box::new(FakeCaptureProvider {
            shared: self.clone(),
        })
    }

    pub(crate) fn open_count(&self) -> usize {
        self.streams.lock().unwrap().len()
    }

    pub(crate) fn last(&self) -> Arc<FakeStream> {
        self.streams.lock().unwrap().last().cloned().unwrap()
    }

    pub(crate) fn stream(&self, index: usize) -> Arc<FakeStream> {
        self.streams.lock().unwrap()[index].clone()
    }
}

struct FakeCaptureProvider {
    shared: FakeCapture,
}

impl CaptureProvider for FakeCaptureProvider {
    fn open(&mut self, constraints: &CaptureConstraints) -> CoreResult<Arc<dyn MediaStream>> {
        if self.shared.fail.load(Ordering::SeqCst) {
            return Err(CaptureError::PermissionDenied {
                reason: "denied by test".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let stream = Arc::new(FakeStream {
            id: Uuid::new_v4().to_string(),
            constraints: constraints.clone(),
            stopped: AtomicBool::new(false),
        });
        let mut streams = self.shared.streams.lock().unwrap();
        streams.push(Arc::clone(&stream));
        drop(streams);
        Ok(stream)
    }
}

/// Shared view of every recorder a [`FakeRecorderProvider`] created.
#[derive(Clone, Default)]
pub(crate) struct FakeRecorders {
    pub(crate) sinks: Arc<Mutex<Vec<ChunkSink>>>,
    pub(crate) events: Arc<Mutex<Vec<&'static str>>>,
    pub(crate) fail_create: Arc<AtomicBool>,
    pub(crate) fail_stop: Arc<AtomicBool>,
    /// Chunk each recorder delivers while stopping.
    pub(crate) trailing_chunk: Arc<Mutex<Option<Vec<u8>>>>,
}

impl FakeRecorders {
    pub(crate) fn provider(&self) -> Box<dyn RecorderProvider> {
        Box::new(FakeRecorderProvider {
            shared: self.clone(),
        })
    }

    pub(crate) fn sink(&self, index: usize) -> ChunkSink {
        self.sinks.lock().unwrap()[index].clone()
    }

    pub(crate) fn last_sink(&self) -> ChunkSink {
        self.sinks.lock().unwrap().last().cloned().unwrap()
    }

    pub(crate) fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

struct FakeRecorderProvider {
    shared: FakeRecorders,
}

impl RecorderProvider for FakeRecorderProvider {
    fn create(
        &mut self,
        _stream: &Arc<dyn MediaStream>,
        _mime_type: &str,
        sink: ChunkSink,
    ) -> CoreResult<Box<dyn MediaRecorder>> {
        if self.shared.fail_create.load(Ordering::SeqCst) {
            return Err(CaptureError::Recorder {
                reason: "recorder unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.shared.sinks.lock().unwrap().push(sink.clone());
        self.shared.events.lock().unwrap().push("create");
        Ok(Box::new(FakeRecorder {
            shared: self.shared.clone(),
            sink,
        }))
    }
}

struct FakeRecorder {
    shared: FakeRecorders,
    sink: ChunkSink,
}

impl MediaRecorder for FakeRecorder {
    fn start(&mut self) -> CoreResult<()> {
        self.shared.events.lock().unwrap().push("start");
        Ok(())
    }

    fn stop(&mut self) -> CoreResult<()> {
        self.shared.events.lock().unwrap().push("stop");

        if let Some(chunk) = self.shared.trailing_chunk.lock().unwrap().clone() {
            self.sink.deliver(chunk);
        }

        if self.shared.fail_stop.load(Ordering::SeqCst) {
            return Err(CaptureError::Recorder {
                reason: "finalize failed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

pub(crate) struct FakeEnumerator {
    pub(crate) devices: Vec<MediaDeviceInfo>,
    pub(crate) calls: Arc<AtomicUsize>,
}

impl DeviceEnumerator for FakeEnumerator {
    fn enumerate_devices(&mut self) -> CoreResult<Vec<MediaDeviceInfo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.devices.clone())
    }
}

pub(crate) fn device(id: &str, kind: MediaDeviceKind, label: &str) -> MediaDeviceInfo {
    MediaDeviceInfo {
        device_id: DeviceId::new(id),
        kind,
        label: label.to_string(),
    }
}

/// Mixed list with two cameras, as a laptop with an external webcam reports it.
pub(crate) fn laptop_devices() -> Vec<MediaDeviceInfo> {
    vec![
        device("mic-0", MediaDeviceKind::AudioInput, "Built-in Microphone"),
        device("cam-0", MediaDeviceKind::VideoInput, "Integrated Camera"),
        device("spk-0", MediaDeviceKind::AudioOutput, "Speakers"),
        device("cam-1", MediaDeviceKind::VideoInput, "USB Webcam"),
    ]
}

/// Saved bytes, suggested file name and whether the staged file existed.
pub(crate) type SaveRecord = (Vec<u8>, String, bool);

#[derive(Clone, Default)]
pub(crate) struct RecordingSaveTarget {
    pub(crate) saves: Arc<Mutex<Vec<SaveRecord>>>,
    pub(crate) staged_paths: Arc<Mutex<Vec<PathBuf>>>,
    pub(crate) cancel: bool,
}

impl RecordingSaveTarget {
    pub(crate) fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }
}

impl SaveTarget for RecordingSaveTarget {
    fn save(&mut self, artifact: &StagedArtifact, file_name: &str) -> CoreResult<SaveOutcome> {
        let existed = artifact.path().exists();
        let bytes = fs::read(artifact.path()).unwrap_or_default();
        self.saves
            .lock()
            .unwrap()
            .push((bytes, file_name.to_string(), existed));
        self.staged_paths
            .lock()
            .unwrap()
            .push(artifact.path().to_path_buf());

        if self.cancel {
            Ok(SaveOutcome::Cancelled)
        } else {
            let path = PathBuf::from("/downloads").join(file_name);
            Ok(SaveOutcome::Saved(path))
        }
    }
}

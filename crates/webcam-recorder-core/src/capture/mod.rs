mod constraints;
mod selector;
mod surface;

pub use {
    constraints::{
        CameraConstraint, CaptureConstraints, DEFAULT_HEIGHT, DEFAULT_WIDTH, FacingMode,
        MAX_DIMENSION, VideoConstraints,
    },
    selector::{CameraSelector, SelectorMode},
    surface::{CaptureProvider, CaptureSurface, MediaStream},
};

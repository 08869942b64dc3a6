//! Platform implementations of the capture, recording and enumeration capabilities.

#[cfg(feature = "gstreamer")]
pub mod gstreamer;

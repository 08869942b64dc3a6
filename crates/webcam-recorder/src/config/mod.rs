mod capture_config;
#[allow(clippy::module_inception)]
mod config;
mod download_config;
mod video_config;

pub(crate) use {
    capture_config::CaptureConfig, config::Config, download_config::DownloadConfig,
    video_config::VideoConfig,
};

pub(crate) const DEFAULT_AUDIO_ENABLED: bool = true;
pub(crate) const DEFAULT_PROMPT: bool = true;

pub(crate) fn default_audio_enabled() -> bool {
    DEFAULT_AUDIO_ENABLED
}

pub(crate) fn default_prompt() -> bool {
    DEFAULT_PROMPT
}

pub(crate) fn default_file_name() -> String {
    webcam_recorder_core::DEFAULT_FILE_NAME.to_string()
}

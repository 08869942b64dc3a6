use crate::{AppError, config::Config};

use std::{fs, path::PathBuf};

use webcam_recorder_core::{DEFAULT_FILE_NAME, FacingMode, SelectorMode};

fn temp_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "webcam-recorder-config-{}-{}",
        label,
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// WHAT: Defaults match the recorder's documented initial state
/// WHY: A fresh install must behave like the component without configuration
#[test]
fn given_default_config_then_initial_state_matches_component_defaults() {
    let config = Config::default();

    assert_eq!(config.video.width, 420);
    assert_eq!(config.video.height, 420);
    assert!(config.video.mirrored);
    assert!(config.capture.audio_enabled);
    assert_eq!(config.capture.facing_mode, FacingMode::User);
    assert_eq!(config.capture.selector_mode, SelectorMode::FacingModeToggle);
    assert_eq!(config.download.file_name, DEFAULT_FILE_NAME);
    assert!(config.download.prompt);
    assert_eq!(config.download.directory, None);
}

/// WHAT: An empty file parses to the defaults
/// WHY: Every section and key is optional
#[test]
fn given_empty_toml_when_parsing_then_defaults() {
    let config = Config::parse("").unwrap();

    assert_eq!(config, Config::default());
}

/// WHAT: Keys present in a section override only themselves
/// WHY: Users edit single values without restating the whole section
#[test]
fn given_partial_sections_when_parsing_then_missing_keys_defaulted() {
    // Given: A file setting only some keys
    let contents = r#"
[video]
width = 640

[capture]
facing_mode = "environment"
selector_mode = "device_list"

[download]
prompt = false
directory = "/tmp/recordings"
"#;

    // When: Parsing
    let config = Config::parse(contents).unwrap();

    // Then: Set keys are taken, the rest defaulted
    assert_eq!(config.video.width, 640);
    assert_eq!(config.video.height, 420);
    assert!(config.video.mirrored);
    assert_eq!(config.capture.facing_mode, FacingMode::Environment);
    assert_eq!(config.capture.selector_mode, SelectorMode::DeviceList);
    assert!(config.capture.audio_enabled);
    assert!(!config.download.prompt);
    assert_eq!(config.download.file_name, DEFAULT_FILE_NAME);
    assert_eq!(
        config.download.directory,
        Some(PathBuf::from("/tmp/recordings"))
    );
}

/// WHAT: Unknown enum values are rejected with ConfigError
/// WHY: A typo must not silently fall back to a different camera
#[test]
fn given_invalid_facing_mode_when_parsing_then_config_error() {
    let result = Config::parse("[capture]\nfacing_mode = \"sideways\"\n");

    assert!(matches!(result, Err(AppError::ConfigError { .. })));
}

/// WHAT: Zero or oversized video dimensions are rejected with ConfigError
/// WHY: Such sizes would otherwise fail only at the first stream open
#[test]
fn given_unusable_video_size_when_parsing_then_config_error() {
    let zero = Config::parse("[video]\nwidth = 0\n");
    let oversized = Config::parse("[video]\nheight = 3000000000\n");

    assert!(matches!(zero, Err(AppError::ConfigError { .. })));
    assert!(matches!(oversized, Err(AppError::ConfigError { .. })));
}

/// WHAT: A saved config loads back identically and leaves no temp file
/// WHY: Saves are atomic (temp file + rename)
#[test]
fn given_saved_config_when_loading_then_identical_and_no_temp_file() {
    // Given: A non-default config
    let dir = temp_dir("save");
    let path = dir.join("config.toml");
    let mut config = Config::default();
    config.video.mirrored = false;
    config.capture.audio_enabled = false;
    config.download.file_name = "clip.webm".to_string();

    // When: Saving and loading
    config.save_to(&path).unwrap();
    let loaded = Config::load_from(&path).unwrap();

    // Then: Round trip is exact
    assert_eq!(loaded, config);
    assert!(!path.with_extension("toml.tmp").exists());

    let _ = fs::remove_dir_all(&dir);
}

/// WHAT: Loading a missing file is a ConfigError
/// WHY: Read failures must be reported with context
#[test]
fn given_missing_file_when_loading_then_config_error() {
    let dir = temp_dir("missing");

    let result = Config::load_from(&dir.join("absent.toml"));

    assert!(matches!(result, Err(AppError::ConfigError { .. })));

    let _ = fs::remove_dir_all(&dir);
}

/// WHAT: A configured directory wins over the platform Downloads folder
/// WHY: Users without a Downloads folder must be able to pick one
#[test]
fn given_configured_directory_when_resolving_download_dir_then_configured_used() {
    let mut config = Config::default();
    config.download.directory = Some(PathBuf::from("/srv/captures"));

    assert_eq!(config.download_dir(), PathBuf::from("/srv/captures"));
}

/// WHAT: Recorder options carry every configured value
/// WHY: Config only seeds the component; nothing may be dropped on the way
#[test]
fn given_config_when_building_recorder_options_then_fields_carried() {
    // Given: A customized config
    let mut config = Config::default();
    config.video.width = 1280;
    config.video.height = 720;
    config.video.mirrored = false;
    config.capture.audio_enabled = false;
    config.capture.facing_mode = FacingMode::Environment;
    config.capture.selector_mode = SelectorMode::DeviceList;
    config.download.file_name = "take.webm".to_string();

    // When: Building options
    let staging = PathBuf::from("/tmp/staging");
    let options = config.recorder_options(staging.clone());

    // Then: Values match
    assert_eq!(options.video.width, 1280);
    assert_eq!(options.video.height, 720);
    assert!(!options.video.mirrored);
    assert!(!options.audio_enabled);
    assert_eq!(options.facing_mode, FacingMode::Environment);
    assert_eq!(options.selector_mode, SelectorMode::DeviceList);
    assert_eq!(options.file_name, "take.webm");
    assert_eq!(options.staging_dir, staging);
}

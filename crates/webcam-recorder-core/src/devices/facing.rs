use crate::{FacingMode, MediaDeviceInfo, MediaDeviceKind};

const USER_HINTS: &[&str] = &["front", "user", "facetime", "integrated"];
const ENVIRONMENT_HINTS: &[&str] = &["back", "rear", "environment", "world"];

/// Pick the video input that best matches `facing_mode`.
///
/// Labels mentioning a side win. Otherwise `user` is the first video input
/// and `environment` the second, falling back to the first when only one
/// camera exists.
pub fn device_for_facing_mode(
    devices: &[MediaDeviceInfo],
    facing_mode: FacingMode,
) -> Option<&MediaDeviceInfo> {
    let cameras: Vec<&MediaDeviceInfo> = devices
        .iter()
        .filter(|d| d.kind == MediaDeviceKind::VideoInput)
        .collect();

    let hints = match facing_mode {
        FacingMode::User => USER_HINTS,
        FacingMode::Environment => ENVIRONMENT_HINTS,
    };

    let labelled = cameras.iter().copied().find(|d| {
        let label = d.label.to_lowercase();
        hints.iter().any(|hint| label.contains(hint))
    });
    if labelled.is_some() {
        return labelled;
    }

    match facing_mode {
        FacingMode::User => cameras.first().copied(),
        FacingMode::Environment => cameras.get(1).or(cameras.first()).copied(),
    }
}

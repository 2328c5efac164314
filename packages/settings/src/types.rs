// ABOUTME: Type definitions for SyncPlay settings
// ABOUTME: Change payload and the setting names used by the SyncPlay client

use serde::{Deserialize, Serialize};

/// A setting whose stored value changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingChange {
    pub name: String,
    pub new_value: Option<String>,
    pub old_value: Option<String>,
}

/// Setting names read by the SyncPlay client.
///
/// Any name may be stored; these are the ones the playback sync code knows about.
pub mod names {
    pub const ENABLE_SYNC_PLAY_BUTTON: &str = "enableSyncPlayButton";
    pub const ENABLE_SYNC_CORRECTION: &str = "enableSyncCorrection";
    pub const USE_SPEED_TO_SYNC: &str = "useSpeedToSync";
    pub const USE_SKIP_TO_SYNC: &str = "useSkipToSync";
    pub const MIN_DELAY_SPEED_TO_SYNC: &str = "minDelaySpeedToSync";
    pub const MAX_DELAY_SPEED_TO_SYNC: &str = "maxDelaySpeedToSync";
    pub const SPEED_TO_SYNC_DURATION: &str = "speedToSyncDuration";
    pub const MIN_DELAY_SKIP_TO_SYNC: &str = "minDelaySkipToSync";
    pub const EXTRA_TIME_OFFSET: &str = "extraTimeOffset";

    pub const ALL: &[&str] = &[
        ENABLE_SYNC_PLAY_BUTTON,
        ENABLE_SYNC_CORRECTION,
        USE_SPEED_TO_SYNC,
        USE_SKIP_TO_SYNC,
        MIN_DELAY_SPEED_TO_SYNC,
        MAX_DELAY_SPEED_TO_SYNC,
        SPEED_TO_SYNC_DURATION,
        MIN_DELAY_SKIP_TO_SYNC,
        EXTRA_TIME_OFFSET,
    ];
}

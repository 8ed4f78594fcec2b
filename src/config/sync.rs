use serde::{Deserialize, Serialize};

use crate::services::storage::recent::DEFAULT_RECENT_LIMIT;
use crate::utils::time::{CLICKED_CAPTION_TIMEOUT_MS, TIME_TOLERANCE};

// Tuning of the playback synchronization controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    // Period of the playback widget time poll
    pub poll_interval_ms: u64,
    // Delay before the second seek attempt
    pub seek_retry_delay_ms: u64,
    // How long a clicked caption stays pinned
    pub pin_timeout_ms: u64,
    // Backward samples further than this are treated as external seeks
    pub jump_threshold_secs: f64,
    pub tolerance_secs: f64,
    // Resume playback after a seek issued while paused
    pub resume_on_seek: bool,
    pub recent_limit: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            seek_retry_delay_ms: 100,
            pin_timeout_ms: CLICKED_CAPTION_TIMEOUT_MS,
            jump_threshold_secs: 1.0,
            tolerance_secs: TIME_TOLERANCE,
            resume_on_seek: true,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

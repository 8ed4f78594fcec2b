use serde::{Deserialize, Serialize};

/// State reported by the playback widget.
///
/// Only `1` (playing) and `2` (paused) carry meaning for synchronization; every
/// other code is kept verbatim in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Playing,
    Paused,
    Other(i32),
}

impl PlayerState {
    pub const PLAYING: i32 = 1;
    pub const PAUSED: i32 = 2;

    pub fn from_code(code: i32) -> Self {
        match code {
            Self::PLAYING => PlayerState::Playing,
            Self::PAUSED => PlayerState::Paused,
            other => PlayerState::Other(other),
        }
    }
}

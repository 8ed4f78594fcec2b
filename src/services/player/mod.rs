//! Playback widget boundary
//!
//! The embedded video player is an external collaborator. It is reached only
//! through [`PlayerHandle`], which owns the current widget (replaced wholesale
//! when the widget re-initializes) and turns every widget failure into a
//! logged no-op or an unknown result.

use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;

use crate::errors::AppResult;
use crate::models::PlayerState;

/// Operations the synchronization logic needs from the video player.
pub trait PlaybackWidget: Send + Sync {
    fn get_current_time(&self) -> AppResult<f64>;
    fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) -> AppResult<()>;
    fn play_video(&self) -> AppResult<()>;
    fn pause_video(&self) -> AppResult<()>;
    /// Raw state code: `1` playing, `2` paused, anything else unspecified.
    fn get_player_state(&self) -> AppResult<i32>;
    fn get_duration(&self) -> AppResult<f64>;
}

#[derive(Default)]
pub struct PlayerHandle {
    widget: RwLock<Option<Arc<dyn PlaybackWidget>>>,
}

impl PlayerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a (re)initialized widget, dropping the previous one.
    pub fn replace(&self, widget: Arc<dyn PlaybackWidget>) {
        *self.widget.write() = Some(widget);
        debug!("Playback widget attached");
    }

    pub fn current_time(&self) -> Option<f64> {
        self.call("getCurrentTime", |w| w.get_current_time())
    }

    /// Returns `None` when the widget is missing or failed.
    pub fn state(&self) -> Option<PlayerState> {
        self.call("getPlayerState", |w| w.get_player_state())
            .map(PlayerState::from_code)
    }

    pub fn seek_to(&self, seconds: f64) -> bool {
        self.call("seekTo", |w| w.seek_to(seconds, true)).is_some()
    }

    pub fn play(&self) -> bool {
        self.call("playVideo", |w| w.play_video()).is_some()
    }

    pub fn pause(&self) -> bool {
        self.call("pauseVideo", |w| w.pause_video()).is_some()
    }

    fn call<T>(&self, operation: &str, f: impl FnOnce(&dyn PlaybackWidget) -> AppResult<T>) -> Option<T> {
        // Clone the Arc so the widget is never called under the lock
        let widget = self.widget.read().clone()?;
        match f(widget.as_ref()) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Playback widget {} failed: {}", operation, e);
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use crate::errors::AppError;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Seek(f64),
        Play,
        Pause,
    }

    /// Scriptable widget that records every mutating call.
    pub struct FakeWidget {
        pub time: Mutex<f64>,
        pub state: Mutex<i32>,
        pub duration: f64,
        pub failing: Mutex<bool>,
        pub calls: Mutex<Vec<Call>>,
    }

    impl FakeWidget {
        pub fn new(state: i32) -> Arc<Self> {
            Arc::new(Self {
                time: Mutex::new(0.0),
                state: Mutex::new(state),
                duration: 120.0,
                failing: Mutex::new(false),
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        pub fn set_time(&self, time: f64) {
            *self.time.lock() = time;
        }

        pub fn set_state(&self, state: i32) {
            *self.state.lock() = state;
        }

        pub fn set_failing(&self, failing: bool) {
            *self.failing.lock() = failing;
        }

        fn check(&self) -> AppResult<()> {
            if *self.failing.lock() {
                Err(AppError::PlayerError("widget not ready".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl PlaybackWidget for FakeWidget {
        fn get_current_time(&self) -> AppResult<f64> {
            self.check()?;
            Ok(*self.time.lock())
        }

        fn seek_to(&self, seconds: f64, _allow_seek_ahead: bool) -> AppResult<()> {
            self.check()?;
            self.calls.lock().push(Call::Seek(seconds));
            *self.time.lock() = seconds;
            Ok(())
        }

        fn play_video(&self) -> AppResult<()> {
            self.check()?;
            self.calls.lock().push(Call::Play);
            *self.state.lock() = PlayerState::PLAYING;
            Ok(())
        }

        fn pause_video(&self) -> AppResult<()> {
            self.check()?;
            self.calls.lock().push(Call::Pause);
            *self.state.lock() = PlayerState::PAUSED;
            Ok(())
        }

        fn get_player_state(&self) -> AppResult<i32> {
            self.check()?;
            Ok(*self.state.lock())
        }

        fn get_duration(&self) -> AppResult<f64> {
            self.check()?;
            Ok(self.duration)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{Call, FakeWidget};
    use super::*;

    #[test]
    fn test_missing_widget_is_unknown_state() {
        let handle = PlayerHandle::new();
        assert_eq!(handle.state(), None);
        assert_eq!(handle.current_time(), None);
        assert!(!handle.seek_to(3.0));
    }

    #[test]
    fn test_widget_failures_are_swallowed() {
        let widget = FakeWidget::new(PlayerState::PLAYING);
        let handle = PlayerHandle::new();
        handle.replace(widget.clone());
        widget.set_failing(true);

        assert_eq!(handle.state(), None);
        assert_eq!(handle.current_time(), None);
        assert!(!handle.play());
        assert!(widget.calls().is_empty());
    }

    #[test]
    fn test_replace_swaps_widget() {
        let first = FakeWidget::new(PlayerState::PLAYING);
        let second = FakeWidget::new(PlayerState::PAUSED);
        let handle = PlayerHandle::new();
        handle.replace(first.clone());
        handle.replace(second.clone());

        assert_eq!(handle.state(), Some(PlayerState::Paused));
        assert!(handle.seek_to(12.5));
        assert!(first.calls().is_empty());
        assert_eq!(second.calls(), vec![Call::Seek(12.5)]);
    }
}

//! Playback synchronization controller
//!
//! Keeps the displayed playback time and the active caption in step with the
//! playback widget. Small backward jitter from the time poll is rejected, a
//! clicked caption is pinned for a short while, and seeks are issued twice
//! because some widget states silently drop the first one.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, trace};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::SyncConfig;
use crate::events::{EventBus, SessionEvent};
use crate::models::{Caption, CaptionSet, PlayerState};
use crate::services::captions::resolver;
use crate::services::player::{PlaybackWidget, PlayerHandle};
use crate::utils::time::normalize;

use super::poller;

#[derive(Default)]
struct SyncState {
    current_time: f64,
    seeking: bool,
    pinned: Option<Caption>,
    // Bumped on every pin change; an expiry only clears its own generation
    pin_generation: u64,
    pin_timer: Option<JoinHandle<()>>,
    // Same scheme for the second seek attempt
    seek_generation: u64,
    seek_retry: Option<JoinHandle<()>>,
    captions: CaptionSet,
    active: Option<usize>,
}

impl SyncState {
    fn cancel_seek_retry(&mut self) {
        self.seek_generation += 1;
        if let Some(retry) = self.seek_retry.take() {
            retry.abort();
        }
    }
}

pub(super) struct Inner {
    state: Mutex<SyncState>,
    pub(super) player: PlayerHandle,
    config: SyncConfig,
    events: EventBus,
    poller: Mutex<Option<(CancellationToken, JoinHandle<()>)>>,
}

pub struct SyncController {
    inner: Arc<Inner>,
}

impl SyncController {
    pub fn new(config: SyncConfig, events: EventBus) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(SyncState::default()),
                player: PlayerHandle::new(),
                config,
                events,
                poller: Mutex::new(None),
            }),
        }
    }

    pub fn current_time(&self) -> f64 {
        self.inner.state.lock().current_time
    }

    pub fn is_seeking(&self) -> bool {
        self.inner.state.lock().seeking
    }

    pub fn pinned(&self) -> Option<Caption> {
        self.inner.state.lock().pinned.clone()
    }

    pub fn captions(&self) -> CaptionSet {
        self.inner.state.lock().captions.clone()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.inner.state.lock().active
    }

    pub fn active_caption(&self) -> Option<Caption> {
        let state = self.inner.state.lock();
        state.active.and_then(|index| state.captions.get(index).cloned())
    }

    /// Offers a raw time sample from the playback widget.
    ///
    /// Returns whether the sample was accepted as the new current time.
    pub fn on_time_sample(&self, raw: f64) -> bool {
        self.inner.on_time_sample(raw)
    }

    /// Seeks the widget to `target`, pinning `clicked` when the seek comes
    /// from a caption selection.
    ///
    /// Must be called from within a tokio runtime: the pin expiry and the
    /// second seek attempt run as spawned tasks.
    pub fn request_seek(&self, target: f64, clicked: Option<Caption>) {
        Inner::request_seek(&self.inner, target, clicked);
    }

    pub fn get_player_state(&self) -> Option<PlayerState> {
        self.inner.player.state()
    }

    pub fn toggle_play_pause(&self) {
        match self.inner.player.state() {
            Some(PlayerState::Playing) => {
                self.inner.player.pause();
            }
            Some(PlayerState::Paused) => {
                self.inner.player.play();
            }
            other => debug!("Play/pause ignored in player state {:?}", other),
        }
    }

    /// Attaches a (re)initialized widget and (re)starts the time poll.
    pub fn on_player_ready(&self, widget: Arc<dyn PlaybackWidget>) {
        self.inner.player.replace(widget);

        let token = CancellationToken::new();
        let period = Duration::from_millis(self.inner.config.poll_interval_ms.max(1));
        let handle = poller::spawn(Arc::clone(&self.inner), period, token.clone());
        if let Some((previous, _)) = self.inner.poller.lock().replace((token, handle)) {
            previous.cancel();
        }
        info!("Playback widget ready, polling every {:?}", period);
    }

    /// Replaces the caption set. Any pin belongs to the old set and is dropped.
    pub fn replace_captions(&self, captions: CaptionSet) {
        {
            let mut state = self.inner.state.lock();
            state.captions = captions;
            state.pinned = None;
            state.pin_generation += 1;
            if let Some(timer) = state.pin_timer.take() {
                timer.abort();
            }
        }
        self.inner.refresh_active();
    }

    /// Returns the clock to zero for a new video.
    pub fn reset_time(&self) {
        {
            let mut state = self.inner.state.lock();
            state.current_time = 0.0;
            state.seeking = false;
            state.cancel_seek_retry();
        }
        self.inner.events.emit(SessionEvent::TimeUpdated { time: 0.0 });
        self.inner.refresh_active();
    }

    /// Stops the poll and every pending timer.
    pub fn shutdown(&self) {
        if let Some((token, _)) = self.inner.poller.lock().take() {
            token.cancel();
        }
        let mut state = self.inner.state.lock();
        if let Some(timer) = state.pin_timer.take() {
            timer.abort();
        }
        state.cancel_seek_retry();
        debug!("Sync controller shut down");
    }
}

impl Drop for SyncController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl Inner {
    pub(super) fn on_time_sample(&self, raw: f64) -> bool {
        let sample = normalize(raw);
        let changed = {
            let mut state = self.state.lock();
            let delta = sample - state.current_time;
            let jump = delta.abs() > self.config.jump_threshold_secs;
            if !(state.seeking || delta >= 0.0 || jump) {
                trace!("Rejected backward sample {} (current {})", sample, state.current_time);
                return false;
            }
            if jump && !state.seeking {
                info!("External jump from {} to {}", state.current_time, sample);
            }
            state.seeking = false;
            let changed = state.current_time != sample;
            state.current_time = sample;
            changed
        };

        if changed {
            self.events.emit(SessionEvent::TimeUpdated { time: sample });
            self.refresh_active();
        }
        true
    }

    fn request_seek(this: &Arc<Self>, target: f64, clicked: Option<Caption>) {
        let target = normalize(target);
        // Captured now; the state may change before the retry runs
        let was_paused = this.player.state() == Some(PlayerState::Paused);

        {
            let mut state = this.state.lock();
            if let Some(caption) = clicked {
                debug!("Pinning caption at {}", caption.start);
                state.pinned = Some(caption);
                state.pin_generation += 1;
                let generation = state.pin_generation;
                if let Some(previous) = state.pin_timer.take() {
                    previous.abort();
                }
                state.pin_timer = Some(Self::spawn_pin_expiry(this, generation));
            }
            state.seeking = true;
            state.cancel_seek_retry();
            let generation = state.seek_generation;
            state.seek_retry = Some(Self::spawn_seek_retry(this, generation, target, was_paused));
        }

        info!("Seeking to {}", target);
        this.player.seek_to(target);
        this.refresh_active();
    }

    fn spawn_pin_expiry(this: &Arc<Self>, generation: u64) -> JoinHandle<()> {
        let inner = Arc::clone(this);
        let timeout = Duration::from_millis(this.config.pin_timeout_ms);
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            {
                let mut state = inner.state.lock();
                if state.pin_generation != generation {
                    return;
                }
                state.pinned = None;
                state.pin_timer = None;
            }
            debug!("Caption pin expired");
            inner.refresh_active();
        })
    }

    fn spawn_seek_retry(this: &Arc<Self>, generation: u64, target: f64, was_paused: bool) -> JoinHandle<()> {
        let inner = Arc::clone(this);
        let delay = Duration::from_millis(this.config.seek_retry_delay_ms);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            inner.finish_seek(generation, target, was_paused);
        })
    }

    // Second seek attempt. A retry superseded by a newer seek, a reset or a
    // shutdown leaves the state and the widget alone.
    fn finish_seek(&self, generation: u64, target: f64, was_paused: bool) -> bool {
        {
            let mut state = self.state.lock();
            if state.seek_generation != generation {
                debug!("Dropping superseded seek retry to {}", target);
                return false;
            }
            state.current_time = target;
            state.seek_retry = None;
        }

        self.player.seek_to(target);
        if was_paused && self.config.resume_on_seek {
            debug!("Resuming playback after seek");
            self.player.play();
        }
        self.events.emit(SessionEvent::TimeUpdated { time: target });
        self.refresh_active();
        true
    }

    fn refresh_active(&self) {
        let changed = {
            let mut state = self.state.lock();
            let active = resolver::active_index(
                &state.captions,
                state.current_time,
                state.pinned.as_ref(),
                self.config.tolerance_secs,
            );
            if active == state.active {
                None
            } else {
                state.active = active;
                Some(active)
            }
        };

        if let Some(index) = changed {
            self.events.emit(SessionEvent::ActiveCaptionChanged { index });
        }
    }
}

//! Caption session
//!
//! One viewing session: the current video, its caption set, the playback
//! synchronization controller and the recent URL list. Every user action of
//! the caption view goes through here.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};
use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::events::{EventBus, SessionEvent};
use crate::models::{Caption, CaptionSet, Command, PlayerState};
use crate::services::captions::{next_index, parse_subtitles, previous_index, upload, CaptionSource};
use crate::services::player::PlaybackWidget;
use crate::services::storage::{KeyValueStore, RecentUrls};
use crate::services::sync::SyncController;
use crate::services::video::validate_url;


pub struct CaptionSession {
    sync: SyncController,
    source: Arc<dyn CaptionSource>,
    recent: RecentUrls,
    events: EventBus,
    video_id: Mutex<Option<String>>,
    loading: AtomicBool,
}

// Clears the loading flag however the load ends, including when the load
// future is dropped before completing
struct LoadingGuard<'a> {
    session: &'a CaptionSession,
}

impl<'a> LoadingGuard<'a> {
    fn start(session: &'a CaptionSession) -> Self {
        session.set_loading(true);
        Self { session }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.session.set_loading(false);
    }
}

impl CaptionSession {
    pub fn new(
        config: &AppConfig,
        source: Arc<dyn CaptionSource>,
        store: Arc<dyn KeyValueStore>,
        events: EventBus,
    ) -> Self {
        Self {
            sync: SyncController::new(config.sync.clone(), events.clone()),
            source,
            recent: RecentUrls::with_limit(store, config.sync.recent_limit),
            events,
            video_id: Mutex::new(None),
            loading: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn sync(&self) -> &SyncController {
        &self.sync
    }

    pub fn recent(&self) -> &RecentUrls {
        &self.recent
    }

    pub fn video_id(&self) -> Option<String> {
        self.video_id.lock().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn captions(&self) -> CaptionSet {
        self.sync.captions()
    }

    pub fn current_time(&self) -> f64 {
        self.sync.current_time()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.sync.active_index()
    }

    pub fn active_caption(&self) -> Option<Caption> {
        self.sync.active_caption()
    }

    /// Loads the captions of the video behind `url`.
    ///
    /// An invalid URL is rejected before anything changes. A failed fetch
    /// leaves the session with no captions and is reported both as an error
    /// event and as the returned error.
    pub async fn load_video(&self, url: &str) -> AppResult<CaptionSet> {
        let video_id = match validate_url(url) {
            Ok(id) => id,
            Err(e) => {
                self.events.emit_error(&e);
                return Err(e);
            }
        };

        info!("Loading video {}", video_id);
        *self.video_id.lock() = Some(video_id.clone());
        let _loading = LoadingGuard::start(self);
        self.replace_captions(CaptionSet::empty());
        self.sync.reset_time();

        if let Err(e) = self.recent.add(url) {
            warn!("Failed to record recent URL: {}", e);
        }

        // Overlapping loads are not coordinated: whichever resolves last wins
        match self.source.fetch_captions(&video_id).await {
            Ok(captions) => {
                self.replace_captions(captions.clone());
                Ok(captions)
            }
            Err(e) => {
                self.events.emit_error(&e);
                self.replace_captions(CaptionSet::empty());
                Err(e)
            }
        }
    }

    /// Replaces the captions with those parsed from uploaded text.
    pub fn upload_text(&self, content: &str) -> CaptionSet {
        let captions = parse_subtitles(content);
        self.replace_captions(captions.clone());
        self.sync.reset_time();
        captions
    }

    pub async fn upload_file(&self, path: &Path) -> AppResult<CaptionSet> {
        match upload::read_subtitle_file(path).await {
            Ok(captions) => {
                self.replace_captions(captions.clone());
                self.sync.reset_time();
                Ok(captions)
            }
            Err(e) => {
                self.events.emit_error(&e);
                Err(e)
            }
        }
    }

    /// Seeks to the caption at `index` and pins it.
    ///
    /// Like every seeking entry point below (`next_caption`,
    /// `previous_caption`, `handle_command`, `handle_key`), this must be
    /// called from within a tokio runtime: the pin expiry and the second seek
    /// attempt run as spawned tasks.
    pub fn click_caption(&self, index: usize) -> Option<Caption> {
        let caption = self.captions().get(index).cloned()?;
        self.sync.request_seek(caption.start, Some(caption.clone()));
        Some(caption)
    }

    /// Must be called from within a tokio runtime.
    pub fn next_caption(&self) -> Option<Caption> {
        let index = next_index(self.captions().len(), self.active_index())?;
        self.click_caption(index)
    }

    /// Must be called from within a tokio runtime.
    pub fn previous_caption(&self) -> Option<Caption> {
        let index = previous_index(self.captions().len(), self.active_index())?;
        self.click_caption(index)
    }

    /// Must be called from within a tokio runtime; navigation commands seek.
    pub fn handle_command(&self, command: Command) {
        match command {
            Command::TogglePlayPause => self.sync.toggle_play_pause(),
            Command::PreviousCaption => {
                self.previous_caption();
            }
            Command::NextCaption => {
                self.next_caption();
            }
        }
    }

    /// Returns whether the key is bound to a command.
    ///
    /// Must be called from within a tokio runtime; navigation keys seek.
    pub fn handle_key(&self, key: &str) -> bool {
        match Command::from_key(key) {
            Some(command) => {
                self.handle_command(command);
                true
            }
            None => false,
        }
    }

    /// Must be called from within a tokio runtime: starts the time poll.
    pub fn on_player_ready(&self, widget: Arc<dyn PlaybackWidget>) {
        self.sync.on_player_ready(widget);
    }

    pub fn on_time_sample(&self, raw: f64) -> bool {
        self.sync.on_time_sample(raw)
    }

    pub fn player_state(&self) -> Option<PlayerState> {
        self.sync.get_player_state()
    }

    pub fn shutdown(&self) {
        self.sync.shutdown();
    }

    fn replace_captions(&self, captions: CaptionSet) {
        let count = captions.len();
        self.sync.replace_captions(captions);
        self.events.emit(SessionEvent::CaptionsReplaced { count });
    }

    fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
        self.events.emit(SessionEvent::LoadingChanged { loading });
    }
}

// Command handlers used by the binary
// Each handler maps errors to display strings at the boundary

pub mod caption_commands;
pub mod recent_commands;
pub mod video_commands;

pub use caption_commands::*;
pub use recent_commands::*;
pub use video_commands::*;

use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, warn};

use crate::config::{self, AppConfig};
use crate::errors::AppResult;
use crate::services::captions::HttpCaptionClient;
use crate::services::storage::{self, JsonFileStore, KeyValueStore, MemoryStore};

/// Shared state handed to every command.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub client: Arc<HttpCaptionClient>,
}

impl AppState {
    /// Opens the store, loads the stored config and applies environment
    /// overrides. `store_path` takes precedence over every other location.
    pub fn init(store_path: Option<PathBuf>) -> AppResult<Self> {
        let env_config = AppConfig::default().with_env_overrides();
        let path = store_path
            .or_else(|| env_config.store_path.as_ref().map(PathBuf::from))
            .or_else(storage::default_store_path);

        let store: Arc<dyn KeyValueStore> = match path {
            Some(path) => Arc::new(JsonFileStore::open(path)),
            None => {
                warn!("No data directory available, settings will not persist");
                Arc::new(MemoryStore::new())
            }
        };

        let config = config::load_config(store.as_ref())?.with_env_overrides();
        debug!("Using backend {}", config.backend_url);
        let client = Arc::new(HttpCaptionClient::from_config(&config)?);

        Ok(Self { config, store, client })
    }
}

// Configuration module
// Application settings, persisted in the same key-value store as the recent URLs

use std::env;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::services::storage::KeyValueStore;

pub mod sync;

pub use sync::SyncConfig;

const STORE_KEY: &str = "app_config";

pub const ENV_BACKEND_URL: &str = "XCAPTION_BACKEND_URL";
pub const ENV_LANG: &str = "XCAPTION_LANG";
pub const ENV_RESUME_ON_SEEK: &str = "XCAPTION_RESUME_ON_SEEK";
pub const ENV_STORE: &str = "XCAPTION_STORE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub caption_language: String,
    pub request_timeout_secs: u64,
    pub store_path: Option<String>,
    pub sync: SyncConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            caption_language: "en".to_string(),
            request_timeout_secs: 30,
            store_path: None,
            sync: SyncConfig::default(),
        }
    }
}

impl AppConfig {
    /// Applies `XCAPTION_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.trim().is_empty()) {
            self.backend_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(lang) = lookup(ENV_LANG).filter(|v| !v.trim().is_empty()) {
            self.caption_language = lang.trim().to_string();
        }
        if let Some(value) = lookup(ENV_RESUME_ON_SEEK) {
            match parse_env_bool(&value) {
                Some(flag) => self.sync.resume_on_seek = flag,
                None => warn!("Ignoring invalid {}={}", ENV_RESUME_ON_SEEK, value),
            }
        }
        if let Some(path) = lookup(ENV_STORE).filter(|v| !v.trim().is_empty()) {
            self.store_path = Some(path);
        }
        self
    }
}

// Load the configuration from the store, falling back to defaults
pub fn load_config(store: &dyn KeyValueStore) -> AppResult<AppConfig> {
    match store.get(STORE_KEY) {
        Some(value) => serde_json::from_value::<AppConfig>(value)
            .map_err(|e| AppError::ConfigurationError(format!("Failed to parse config: {}", e))),
        None => {
            debug!("No stored config, using defaults");
            Ok(AppConfig::default())
        }
    }
}

pub fn save_config(store: &dyn KeyValueStore, config: &AppConfig) -> AppResult<()> {
    let value = serde_json::to_value(config)
        .map_err(|e| AppError::ConfigurationError(format!("Failed to serialize config: {}", e)))?;
    store.set(STORE_KEY, value);
    store
        .save()
        .map_err(|e| AppError::ConfigurationError(format!("Failed to persist config: {}", e)))
}

fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

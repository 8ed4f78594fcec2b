use super::AppState;
use crate::services::storage::RecentUrls;

fn recent_urls(state: &AppState) -> RecentUrls {
    RecentUrls::with_limit(state.store.clone(), state.config.sync.recent_limit)
}

pub fn get_recent_urls(state: &AppState) -> Result<Vec<String>, String> {
    Ok(recent_urls(state).list())
}

pub fn remove_recent_url(state: &AppState, url: String) -> Result<Vec<String>, String> {
    recent_urls(state).remove(&url).map_err(|e| e.to_string())
}

pub fn clear_recent_urls(state: &AppState) -> Result<(), String> {
    recent_urls(state).clear().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio_test::assert_ok;

    use super::*;
    use crate::config::AppConfig;
    use crate::services::captions::HttpCaptionClient;
    use crate::services::storage::MemoryStore;

    fn state() -> AppState {
        let config = AppConfig::default();
        AppState {
            client: Arc::new(HttpCaptionClient::from_config(&config).unwrap()),
            store: Arc::new(MemoryStore::new()),
            config,
        }
    }

    #[test]
    fn test_recent_commands() {
        let state = state();
        let recent = recent_urls(&state);
        recent.add("https://youtu.be/a").unwrap();
        recent.add("https://youtu.be/b").unwrap();

        assert_eq!(get_recent_urls(&state).unwrap(), vec!["https://youtu.be/b", "https://youtu.be/a"]);
        assert_eq!(
            remove_recent_url(&state, "https://youtu.be/b".to_string()).unwrap(),
            vec!["https://youtu.be/a"]
        );
        assert_ok!(clear_recent_urls(&state));
        assert!(get_recent_urls(&state).unwrap().is_empty());
    }
}

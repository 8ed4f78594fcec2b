use std::path::Path;

use serde::Serialize;

use super::AppState;
use crate::events::EventBus;
use crate::models::Caption;
use crate::services::captions::upload;
use crate::session::CaptionSession;

#[derive(Debug, Clone, Serialize)]
pub struct CaptionsResponse {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    pub captions: Vec<Caption>,
    pub count: usize,
}

/// Fetch the captions of a YouTube video through the backend
pub async fn load_captions(state: &AppState, url: String) -> Result<CaptionsResponse, String> {
    let session = CaptionSession::new(
        &state.config,
        state.client.clone(),
        state.store.clone(),
        EventBus::new(),
    );

    let captions = session.load_video(&url).await.map_err(|e| e.to_string())?;
    session.shutdown();

    Ok(CaptionsResponse {
        video_id: session.video_id(),
        count: captions.len(),
        captions: captions.to_vec(),
    })
}

/// Parse a local subtitle file
pub async fn parse_caption_file(path: String) -> Result<CaptionsResponse, String> {
    let captions = upload::read_subtitle_file(Path::new(&path))
        .await
        .map_err(|e| e.to_string())?;

    Ok(CaptionsResponse {
        video_id: None,
        count: captions.len(),
        captions: captions.to_vec(),
    })
}

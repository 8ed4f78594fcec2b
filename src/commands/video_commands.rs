use super::AppState;
use crate::models::VideoInfo;
use crate::services::captions::fetch::HealthStatus;
use crate::services::video::validate_url;

/// Get title, uploader and duration of a YouTube video
pub async fn get_video_info(state: &AppState, url: String) -> Result<VideoInfo, String> {
    let video_id = validate_url(&url).map_err(|e| e.to_string())?;
    state.client.video_info(&video_id).await.map_err(|e| e.to_string())
}

/// Check that the caption backend answers
pub async fn check_backend(state: &AppState) -> Result<HealthStatus, String> {
    log::info!("Checking caption backend at {}", state.client.base_url());
    state.client.health().await.map_err(|e| e.to_string())
}

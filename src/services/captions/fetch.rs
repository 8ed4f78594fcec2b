//! Caption backend client
//!
//! The backend exposes captions per video id, already converted to the caption
//! record shape. Results are normalized again on arrival so that fetched and
//! uploaded sets are indistinguishable.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{Caption, CaptionSet, VideoInfo};

/// Source of captions for a video.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    async fn fetch_captions(&self, video_id: &str) -> AppResult<CaptionSet>;
}

#[derive(Debug, Deserialize)]
struct CaptionsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    captions: Vec<Caption>,
    #[serde(default)]
    count: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
}

pub struct HttpCaptionClient {
    client: Client,
    base_url: String,
    language: String,
}

impl HttpCaptionClient {
    pub fn new(base_url: impl Into<String>, language: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigurationError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: language.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Self::new(
            config.backend_url.clone(),
            config.caption_language.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn video_info(&self, video_id: &str) -> AppResult<VideoInfo> {
        let url = format!("{}/api/video-info/{}", self.base_url, video_id);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<VideoInfo>().await?)
    }

    pub async fn health(&self) -> AppResult<HealthStatus> {
        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<HealthStatus>().await?)
    }
}

#[async_trait]
impl CaptionSource for HttpCaptionClient {
    async fn fetch_captions(&self, video_id: &str) -> AppResult<CaptionSet> {
        let url = format!("{}/api/captions/{}", self.base_url, video_id);
        info!("Fetching captions for video ID: {}", video_id);

        let response = self
            .client
            .get(&url)
            .query(&[("lang", self.language.as_str())])
            .send()
            .await?;
        let response = check_status(response).await?;
        let body = response.text().await?;
        captions_from_body(&body)
    }
}

async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::FetchError(error_message(status, &body)))
}

fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => err.detail,
        Err(_) if body.trim().is_empty() => format!("backend returned {}", status),
        Err(_) => format!("backend returned {}: {}", status, body.trim()),
    }
}

fn captions_from_body(body: &str) -> AppResult<CaptionSet> {
    let payload: CaptionsResponse = serde_json::from_str(body)?;
    if !payload.success {
        return Err(AppError::FetchError("backend reported failure".to_string()));
    }

    if let Some(count) = payload.count {
        if count != payload.captions.len() {
            warn!("Backend announced {} captions but sent {}", count, payload.captions.len());
        }
    }

    let set = CaptionSet::from_records(payload.captions);
    info!("Fetched {} captions", set.len());
    Ok(set)
}

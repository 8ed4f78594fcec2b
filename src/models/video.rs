use serde::{Deserialize, Serialize};

/// Basic video metadata returned by the caption backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(rename = "videoId")]
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub uploader: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_info_from_backend_payload() {
        let payload = r#"{
            "videoId": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "uploader": "Rick Astley",
            "duration": 212,
            "view_count": 1500000000,
            "description": "The official video..."
        }"#;
        let info: VideoInfo = serde_json::from_str(payload).unwrap();
        assert_eq!(info.video_id, "dQw4w9WgXcQ");
        assert_eq!(info.duration, 212.0);
        assert_eq!(info.uploader, "Rick Astley");
    }

    #[test]
    fn test_video_info_missing_fields_default() {
        let info: VideoInfo = serde_json::from_str(r#"{"videoId": "abc"}"#).unwrap();
        assert_eq!(info.title, "");
        assert_eq!(info.view_count, 0);
    }
}

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, AppResult};

// Tried in order; the first capture group is the video id
static VIDEO_ID_PATTERNS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)").unwrap(),
        Regex::new(r"youtube\.com/watch\?.*v=([^&\n?#]+)").unwrap(),
    ]
});

pub const EMPTY_URL_MESSAGE: &str = "Please enter a YouTube URL";
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid YouTube URL";

/// Extracts the video id from a watch, short or embed URL.
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_ID_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Validates user input before any load is attempted.
pub fn validate_url(url: &str) -> AppResult<String> {
    if url.trim().is_empty() {
        return Err(AppError::ValidationError(EMPTY_URL_MESSAGE.to_string()));
    }
    extract_video_id(url).ok_or_else(|| AppError::ValidationError(INVALID_URL_MESSAGE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        let cases = [
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://youtu.be/dQw4w9WgXcQ?t=42", "dQw4w9WgXcQ"),
            ("https://www.youtube.com/embed/dQw4w9WgXcQ", "dQw4w9WgXcQ"),
            ("https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL1", "dQw4w9WgXcQ"),
            ("https://www.youtube.com/watch?feature=share&v=abc123", "abc123"),
        ];
        for (url, expected) in cases {
            assert_eq!(extract_video_id(url).as_deref(), Some(expected), "{}", url);
        }
    }

    #[test]
    fn test_validate_url_messages() {
        let empty = validate_url("   ").unwrap_err();
        assert_eq!(empty.to_string(), EMPTY_URL_MESSAGE);

        let invalid = validate_url("https://vimeo.com/12345").unwrap_err();
        assert_eq!(invalid.to_string(), INVALID_URL_MESSAGE);
        assert_eq!(invalid.kind(), "validation");

        assert_eq!(validate_url("youtu.be/xyz").unwrap(), "xyz");
    }
}

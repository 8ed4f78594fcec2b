use std::path::Path;

use log::info;

use super::parser::parse_subtitles;
use crate::errors::{AppError, AppResult};
use crate::models::CaptionSet;

/// Extensions offered by the file picker.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["srt", "vtt", "txt"];

pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ACCEPTED_EXTENSIONS.iter().any(|accepted| ext.eq_ignore_ascii_case(accepted)))
        .unwrap_or(false)
}

/// Reads a user-selected subtitle file and parses its content as-is.
pub async fn read_subtitle_file(path: &Path) -> AppResult<CaptionSet> {
    if !is_accepted(path) {
        return Err(AppError::ValidationError(format!(
            "Unsupported caption file {}: expected one of .srt, .vtt, .txt",
            path.display()
        )));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let captions = parse_subtitles(&content);
    info!("Loaded {} captions from {}", captions.len(), path.display());
    Ok(captions)
}

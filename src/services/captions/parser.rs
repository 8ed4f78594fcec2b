//! Subtitle parser
//!
//! Turns raw subtitle text into a [`CaptionSet`]. Two text formats are read:
//! SRT and WebVTT-style plain timestamped text. Parsing never fails; malformed
//! blocks are skipped.

use log::debug;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::models::{Caption, CaptionSet};
use crate::utils::time::timestamp_to_seconds;

static BLANK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").unwrap());

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

static SRT_TIMING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"((\d{2}):(\d{2}):(\d{2}),(\d{3})) --> ((\d{2}):(\d{2}):(\d{2}),(\d{3}))").unwrap()
});

// Hours are optional in WebVTT; cue settings after the end time are ignored
static VTT_TIMING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^((?:(\d{2,}):)?(\d{2}):(\d{2})\.(\d{3}))\s+-->\s+((?:(\d{2,}):)?(\d{2}):(\d{2})\.(\d{3}))",
    )
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    Srt,
    WebVtt,
}

impl SubtitleFormat {
    /// WebVTT files announce themselves with a `WEBVTT` header; anything else
    /// is read as SRT.
    pub fn detect(raw: &str) -> Self {
        let first_line = raw
            .trim_start_matches('\u{feff}')
            .lines()
            .find(|line| !line.trim().is_empty());
        match first_line {
            Some(line) if line.trim_start().starts_with("WEBVTT") => SubtitleFormat::WebVtt,
            _ => SubtitleFormat::Srt,
        }
    }
}

/// Parses subtitle text of either supported format.
pub fn parse_subtitles(raw: &str) -> CaptionSet {
    let captions = match SubtitleFormat::detect(raw) {
        SubtitleFormat::Srt => parse_srt(raw),
        SubtitleFormat::WebVtt => parse_vtt(raw),
    };
    CaptionSet::from_records(captions)
}

/// Parses SRT content into captions sorted by start time.
pub fn parse_srt(raw: &str) -> Vec<Caption> {
    parse_blocks(raw, |line| SRT_TIMING.captures(line))
}

/// Parses WebVTT-style timestamped text into captions sorted by start time.
pub fn parse_vtt(raw: &str) -> Vec<Caption> {
    parse_blocks(raw, |line| VTT_TIMING.captures(line.trim()))
}

fn parse_blocks<'a, F>(raw: &'a str, match_timing: F) -> Vec<Caption>
where
    F: Fn(&'a str) -> Option<Captures<'a>>,
{
    let mut captions = Vec::new();
    let mut skipped = 0usize;

    for block in split_blocks(raw) {
        match parse_block(block, &match_timing) {
            Some(caption) => captions.push(caption),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} malformed subtitle blocks", skipped);
    }

    // Stable: captions sharing a start keep their file order
    captions.sort_by(|a, b| a.start.total_cmp(&b.start));
    captions
}

fn split_blocks(raw: &str) -> Vec<&str> {
    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    BLANK_LINE.split(trimmed).collect()
}

// A block is `[index]`, timing line, one or more text lines
fn parse_block<'a, F>(block: &'a str, match_timing: &F) -> Option<Caption>
where
    F: Fn(&'a str) -> Option<Captures<'a>>,
{
    let lines: Vec<&str> = block.lines().map(|line| line.trim_end_matches('\r')).collect();

    let timing_at = if lines.len() >= 3 && match_timing(lines[1]).is_some() {
        1
    } else if lines.len() >= 2 && match_timing(lines[0]).is_some() {
        0
    } else {
        return None;
    };

    let timing = match_timing(lines[timing_at])?;
    let (start, start_str) = endpoint(&timing, 1)?;
    let (end, end_str) = endpoint(&timing, 6)?;
    if start > end {
        debug!("Dropping block with end before start: {} --> {}", start_str, end_str);
        return None;
    }

    let joined = lines[timing_at + 1..].join(" ");
    let text = HTML_TAG.replace_all(&joined, "").trim().to_string();

    Some(Caption::new(start, end, text).with_time_strings(start_str, end_str))
}

// Group layout per endpoint: whole timestamp, hours, minutes, seconds, millis
fn endpoint(caps: &Captures<'_>, first: usize) -> Option<(f64, String)> {
    let whole = caps.get(first)?.as_str().to_string();
    let hours = caps
        .get(first + 1)
        .map(|m| m.as_str().parse::<u64>())
        .transpose()
        .ok()?
        .unwrap_or(0);
    let minutes = caps.get(first + 2)?.as_str().parse::<u64>().ok()?;
    let seconds = caps.get(first + 3)?.as_str().parse::<u64>().ok()?;
    let millis = caps.get(first + 4)?.as_str().parse::<u64>().ok()?;
    let total = timestamp_to_seconds(hours, minutes, seconds, millis)?;
    Some((total, whole))
}

use std::ops::Deref;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::utils::time::normalize;

/// A timed subtitle entry.
///
/// `start` and `end` are seconds quantized to 0.1s; the source textual
/// timestamps are kept for traceability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(rename = "startTimeString", default)]
    pub start_time_string: String,
    #[serde(rename = "endTimeString", default)]
    pub end_time_string: String,
}

impl Caption {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            start_time_string: String::new(),
            end_time_string: String::new(),
        }
    }

    pub fn with_time_strings(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_time_string = start.into();
        self.end_time_string = end.into();
        self
    }

    /// Whether `time` lies in `[start - tolerance, end + tolerance]`.
    pub fn contains(&self, time: f64, tolerance: f64) -> bool {
        time >= self.start - tolerance && time <= self.end + tolerance
    }
}

/// Immutable, start-ordered sequence of captions.
///
/// Cloning is cheap; a new upload or video load replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptionSet {
    captions: Arc<[Caption]>,
}

impl CaptionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a set from records of any origin: times are quantized, records
    /// ending before they start are dropped and the sequence is stably sorted
    /// by `start`.
    pub fn from_records(records: Vec<Caption>) -> Self {
        let total = records.len();
        let mut captions: Vec<Caption> = records
            .into_iter()
            .map(|mut caption| {
                caption.start = normalize(caption.start);
                caption.end = normalize(caption.end);
                caption
            })
            // Also rejects NaN times
            .filter(|caption| caption.start <= caption.end)
            .collect();
        if captions.len() < total {
            debug!("Dropped {} captions ending before they start", total - captions.len());
        }
        // sort_by is stable: equal starts keep their input order
        captions.sort_by(|a, b| a.start.total_cmp(&b.start));
        Self {
            captions: captions.into(),
        }
    }

    /// Index of the first caption equal to `caption`.
    pub fn index_of(&self, caption: &Caption) -> Option<usize> {
        self.captions.iter().position(|c| c == caption)
    }
}

impl Deref for CaptionSet {
    type Target = [Caption];

    fn deref(&self) -> &[Caption] {
        &self.captions
    }
}

impl From<Vec<Caption>> for CaptionSet {
    fn from(records: Vec<Caption>) -> Self {
        Self::from_records(records)
    }
}

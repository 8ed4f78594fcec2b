//! Playback time helpers
//!
//! Every time value entering the synchronization logic (polled samples, seek
//! targets, parsed timestamps) goes through [`normalize`] so that floating
//! point noise from the playback widget never causes a spurious transition.

/// Tolerance around a pinned caption's `[start, end]` window, in seconds.
pub const TIME_TOLERANCE: f64 = 0.1;

/// How long a clicked caption keeps priority over time-based matching.
pub const CLICKED_CAPTION_TIMEOUT_MS: u64 = 2000;

/// Quantizes seconds to one decimal place, rounding half away from zero.
pub fn normalize(raw_seconds: f64) -> f64 {
    (raw_seconds * 10.0).round() / 10.0
}

/// Converts `HH:MM:SS` plus milliseconds to quantized seconds.
///
/// Returns `None` when the components overflow.
pub fn timestamp_to_seconds(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Option<f64> {
    let whole = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;
    Some(normalize(whole as f64 + millis as f64 / 1000.0))
}

/// Formats seconds as `M:SS` for the caption list.
pub fn format_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(5.04), 5.0);
        assert_eq!(normalize(5.06), 5.1);
        assert_eq!(normalize(4.95), 5.0);
        assert_eq!(normalize(0.25), 0.3);
        assert_eq!(normalize(-0.25), -0.3);
        assert_eq!(normalize(12.0), 12.0);
    }

    #[test]
    fn test_timestamp_to_seconds() {
        assert_eq!(timestamp_to_seconds(0, 0, 1, 0), Some(1.0));
        assert_eq!(timestamp_to_seconds(0, 0, 3, 500), Some(3.5));
        assert_eq!(timestamp_to_seconds(0, 0, 4, 249), Some(4.2));
        assert_eq!(timestamp_to_seconds(1, 2, 3, 456), Some(3723.5));
    }

    #[test]
    fn test_timestamp_overflow_is_none() {
        assert_eq!(timestamp_to_seconds(u64::MAX / 1000, 0, 0, 0), None);
        assert_eq!(timestamp_to_seconds(0, u64::MAX, 0, 0), None);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.9), "0:09");
        assert_eq!(format_time(75.2), "1:15");
        assert_eq!(format_time(3723.5), "62:03");
    }
}

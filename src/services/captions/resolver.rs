//! Active-caption resolution
//!
//! Highlighting is "sticky until next": the active caption is the last one
//! whose start has been reached, even once its own end has passed. A caption
//! the user just clicked (the pin) wins while the clock stays inside its
//! window.

use crate::models::{Caption, CaptionSet};
use crate::utils::time::TIME_TOLERANCE;

/// Returns the caption considered active at `current_time`.
pub fn resolve<'a>(
    captions: &'a [Caption],
    current_time: f64,
    pinned: Option<&'a Caption>,
) -> Option<&'a Caption> {
    resolve_with_tolerance(captions, current_time, pinned, TIME_TOLERANCE)
}

pub fn resolve_with_tolerance<'a>(
    captions: &'a [Caption],
    current_time: f64,
    pinned: Option<&'a Caption>,
    tolerance: f64,
) -> Option<&'a Caption> {
    if let Some(pin) = pinned {
        if pin.contains(current_time, tolerance) {
            return Some(pin);
        }
    }

    last_started(captions, current_time).map(|index| &captions[index])
}

/// Index of the active caption within `captions`, for marking one list entry.
pub fn active_index(
    captions: &CaptionSet,
    current_time: f64,
    pinned: Option<&Caption>,
    tolerance: f64,
) -> Option<usize> {
    if let Some(pin) = pinned {
        if pin.contains(current_time, tolerance) {
            // A pin from a replaced set has no entry to mark
            return captions.index_of(pin);
        }
    }

    last_started(captions, current_time)
}

// Captions are sorted by start, so the started ones form a prefix; the last
// element of that prefix is the latest in file order among equal starts.
fn last_started(captions: &[Caption], current_time: f64) -> Option<usize> {
    let started = captions.partition_point(|caption| caption.start <= current_time);
    started.checked_sub(1)
}

/// Caption after `active`, wrapping to the first one.
pub fn next_index(len: usize, active: Option<usize>) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match active {
        Some(index) if index + 1 < len => Some(index + 1),
        _ => Some(0),
    }
}

/// Caption before `active`, wrapping to the last one.
pub fn previous_index(len: usize, active: Option<usize>) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match active {
        Some(index) if index > 0 && index < len => Some(index - 1),
        _ => Some(len - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_captions() -> CaptionSet {
        CaptionSet::from_records(vec![
            Caption::new(0.0, 2.0, "first"),
            Caption::new(5.0, 7.0, "second"),
        ])
    }

    #[test]
    fn test_nothing_started() {
        let set = CaptionSet::from_records(vec![Caption::new(1.0, 2.0, "x")]);
        assert!(resolve(&set, 0.5, None).is_none());
        assert!(resolve(&[], 10.0, None).is_none());
    }

    #[test]
    fn test_sticky_until_next() {
        let set = two_captions();
        assert_eq!(resolve(&set, 3.0, None).unwrap().text, "first");
        assert_eq!(resolve(&set, 4.9, None).unwrap().text, "first");
        assert_eq!(resolve(&set, 5.0, None).unwrap().text, "second");
        assert_eq!(resolve(&set, 100.0, None).unwrap().text, "second");
    }

    #[test]
    fn test_pin_takes_precedence() {
        let set = two_captions();
        let pin = set[0].clone();
        assert_eq!(resolve(&set, 1.0, Some(&pin)).unwrap().text, "first");

        // Pin on the later caption wins even where "first" would be picked
        let later = set[1].clone();
        assert_eq!(resolve(&set, 4.95, Some(&later)).unwrap().text, "second");
    }

    #[test]
    fn test_pin_outside_window_is_ignored() {
        let set = two_captions();
        let pin = set[0].clone();
        assert_eq!(resolve(&set, 5.5, Some(&pin)).unwrap().text, "second");
    }

    #[test]
    fn test_equal_starts_pick_last_in_order() {
        let set = CaptionSet::from_records(vec![
            Caption::new(1.0, 2.0, "a"),
            Caption::new(1.0, 4.0, "b"),
        ]);
        assert_eq!(resolve(&set, 1.5, None).unwrap().text, "b");
        assert_eq!(active_index(&set, 1.5, None, TIME_TOLERANCE), Some(1));
    }

    #[test]
    fn test_overlapping_captions() {
        let set = CaptionSet::from_records(vec![
            Caption::new(0.0, 10.0, "long"),
            Caption::new(3.0, 4.0, "short"),
        ]);
        assert_eq!(resolve(&set, 5.0, None).unwrap().text, "short");
    }

    #[test]
    fn test_active_index_with_pin() {
        let set = two_captions();
        assert_eq!(active_index(&set, 1.0, Some(&set[0].clone()), TIME_TOLERANCE), Some(0));
        assert_eq!(active_index(&set, 6.0, None, TIME_TOLERANCE), Some(1));

        let foreign = Caption::new(0.0, 3.0, "from a replaced set");
        assert_eq!(active_index(&set, 1.0, Some(&foreign), TIME_TOLERANCE), None);
    }

    #[test]
    fn test_navigation_wraps() {
        assert_eq!(next_index(3, None), Some(0));
        assert_eq!(previous_index(3, None), Some(2));
        assert_eq!(next_index(3, Some(0)), Some(1));
        assert_eq!(next_index(3, Some(2)), Some(0));
        assert_eq!(previous_index(3, Some(0)), Some(2));
        assert_eq!(previous_index(3, Some(2)), Some(1));
        assert_eq!(next_index(0, None), None);
        assert_eq!(previous_index(0, Some(1)), None);
    }
}

//! Event ordering

use std::cmp::Reverse;

use crate::content::{parse_date, Event};

/// Sort events newest first.
///
/// The sort is stable. Events without a parseable date compare equal to
/// each other and go after every dated event (`None` orders below `Some`,
/// so reversing puts it last).
pub fn sort_events(events: &mut [Event]) {
    events.sort_by_cached_key(|e| Reverse(e.date.as_deref().and_then(parse_date)));
}

use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::search::dates::parse_in_zone;

/// Decides whether a raw feed date falls inside a recency window.
///
/// - `window_hours == None` → always `true`
/// - `raw` unparsable → `true` (fail-open)
/// - otherwise `instant >= now - window_hours`, boundary inclusive
///
/// Naive timestamps are read as local to `zone`.
///
/// The fail-open branch means an entry whose date cannot be read is never
/// excluded by a window. That keeps malformed-but-relevant entries visible,
/// at the cost of letting arbitrarily old ones through; revisit if feeds
/// start shipping unparsable dates in volume.
pub fn is_within(
    raw: &str,
    window_hours: Option<u32>,
    now: DateTime<FixedOffset>,
    zone: FixedOffset,
) -> bool {
    let Some(hours) = window_hours else {
        return true;
    };

    let Some(published) = parse_in_zone(raw, zone) else {
        tracing::trace!(raw = %raw, "Unparsable date passes recency window");
        return true;
    };

    match now.checked_sub_signed(TimeDelta::hours(i64::from(hours))) {
        Some(cutoff) => published >= cutoff,
        // window reaches past the earliest representable instant
        None => true,
    }
}

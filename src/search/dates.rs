use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

/// RSS `pubDate` layout after the weekday, e.g. `29 Jul 2025 14:30:00 +0900`.
const RSS_LAYOUT: &str = "%d %b %Y %H:%M:%S %z";
/// Fallback layout without an offset, e.g. `2025-07-29 14:30:00`.
const NAIVE_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// A feed timestamp that parsed in one of the two accepted layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    /// Carried its own UTC offset.
    Aware(DateTime<FixedOffset>),
    /// Had no offset; meaningful only once a zone is assumed.
    Naive(NaiveDateTime),
}

impl ParsedDate {
    /// Pins the value to an instant, reading naive times as local to `zone`.
    ///
    /// Aware values keep their own offset. `None` only for naive values so
    /// close to chrono's range limits that no instant exists.
    pub fn resolve(self, zone: FixedOffset) -> Option<DateTime<FixedOffset>> {
        match self {
            ParsedDate::Aware(dt) => Some(dt),
            ParsedDate::Naive(naive) => zone.from_local_datetime(&naive).single(),
        }
    }
}

/// Parses a feed timestamp.
///
/// Tries, in order:
///
/// 1. `"<weekday>, <day> <month> <year> <hh>:<mm>:<ss> <offset>"`, the RSS
///    form, e.g. `"Tue, 29 Jul 2025 14:30:00 +0900"`. The weekday must be an
///    English three-letter abbreviation (any case) but is not checked
///    against the date: feeds get it wrong often enough that rejecting
///    would drop real entries.
/// 2. `"<year>-<month>-<day> <hh>:<mm>:<ss>"` with no offset.
///
/// Anything else yields `None`. Never panics.
pub fn parse_date(raw: &str) -> Option<ParsedDate> {
    parse_rss(raw)
        .map(ParsedDate::Aware)
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, NAIVE_LAYOUT)
                .ok()
                .map(ParsedDate::Naive)
        })
}

/// [`parse_date`] followed by [`ParsedDate::resolve`].
pub fn parse_in_zone(raw: &str, zone: FixedOffset) -> Option<DateTime<FixedOffset>> {
    parse_date(raw)?.resolve(zone)
}

fn parse_rss(raw: &str) -> Option<DateTime<FixedOffset>> {
    let (weekday, rest) = raw.split_once(',')?;
    if !WEEKDAYS.iter().any(|w| w.eq_ignore_ascii_case(weekday)) {
        return None;
    }
    // chrono would reject a weekday that disagrees with the date, so it is
    // consumed here and only the remainder goes to the layout parser
    DateTime::parse_from_str(rest.trim_start(), RSS_LAYOUT).ok()
}

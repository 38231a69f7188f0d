//! The search pipeline and the pieces it is built from.
//!
//! - [`dates`] - the two accepted feed timestamp layouts
//! - [`recency`] - time-window membership, fail-open on unreadable dates
//! - [`category`] - URL-based category guesses
//! - [`display`] - absolute and relative time strings
//! - [`pipeline`] - orchestration, per-source failure isolation, sorting
//!
//! Every function that interprets or renders a time takes the reference
//! civil timezone as an argument; nothing reads it from global state.

pub mod category;
pub mod dates;
pub mod display;
pub mod pipeline;
pub mod recency;

use chrono::FixedOffset;

pub use category::{classify, Classification};
pub use dates::{parse_date, parse_in_zone, ParsedDate};
pub use display::{format_absolute, relative_time};
pub use pipeline::{
    matches_keyword, sort_newest_first, FeedStats, ResultItem, SearchError, SearchPipeline,
    SearchRequest, SearchResult, SourceFailure, DEFAULT_DESCRIPTION_LIMIT,
};
pub use recency::is_within;

/// Offset of Korea Standard Time from UTC, in seconds. KST has no DST.
pub const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Korea Standard Time, the default reference zone.
pub fn korea_standard_time() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("UTC+09:00 is within FixedOffset range")
}

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use thiserror::Error;

use crate::feed::{Category, Entry, FeedFetcher, FeedSource, FetchError, SourceCatalog};
use crate::search::category::classify;
use crate::search::dates::parse_in_zone;
use crate::search::display::{format_absolute, relative_time};
use crate::search::recency::is_within;
use crate::util::truncate_chars;

/// Default number of description characters kept for display.
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 200;

/// Errors that stop a search before any feed is contacted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Please enter a search keyword")]
    EmptyKeyword,
}

/// One user-initiated search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keyword: String,
    pub category: Category,
    /// Recency window in hours, `None` for no limit.
    pub period_hours: Option<u32>,
}

/// A source that could not be fetched or parsed. Non-fatal.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFailure {
    pub category: Category,
    pub url: String,
    pub error: String,
}

/// Summary of everything collected, before filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedStats {
    pub total: usize,
    /// Earliest parseable publication time, in the reference zone.
    pub oldest: Option<DateTime<FixedOffset>>,
    /// Latest parseable publication time, in the reference zone.
    pub newest: Option<DateTime<FixedOffset>>,
}

/// An entry that passed both filters, with display fields filled in.
#[derive(Debug, Clone, Serialize)]
pub struct ResultItem {
    #[serde(flatten)]
    pub entry: Entry,
    /// Parsed publication time, `None` when the feed date was unreadable.
    pub published: Option<DateTime<FixedOffset>>,
    /// Reference-zone timestamp, or the raw feed date when unparsable.
    pub display_time: String,
    pub relative_time: Option<String>,
    /// Description cut to the display limit, `...` appended when cut.
    pub snippet: String,
}

/// Everything the display layer needs from one search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub keyword: String,
    pub category: Category,
    pub period_hours: Option<u32>,
    /// Newest first; unparsable dates last.
    pub items: Vec<ResultItem>,
    pub stats: FeedStats,
    /// One per source that failed, in source order.
    pub failures: Vec<SourceFailure>,
}

/// Fetch → classify → filter → sort → format, for one request at a time.
#[derive(Debug, Clone)]
pub struct SearchPipeline {
    fetcher: FeedFetcher,
    catalog: SourceCatalog,
    zone: FixedOffset,
    description_limit: usize,
}

impl SearchPipeline {
    /// `zone` is the reference civil timezone: naive feed dates are read in
    /// it and every displayed time is rendered in it.
    pub fn new(fetcher: FeedFetcher, catalog: SourceCatalog, zone: FixedOffset) -> Self {
        Self {
            fetcher,
            catalog,
            zone,
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
        }
    }

    pub fn with_description_limit(mut self, limit: usize) -> Self {
        self.description_limit = limit;
        self
    }

    /// Runs one search.
    ///
    /// Sources are fetched one at a time in catalog order. A source that
    /// fails becomes a [`SourceFailure`] and the search carries on with the
    /// rest, so the only error returned is request validation.
    ///
    /// # Errors
    ///
    /// [`SearchError::EmptyKeyword`] when the keyword is empty or only
    /// whitespace. No request is sent in that case.
    pub async fn search(
        &self,
        request: &SearchRequest,
        now: DateTime<FixedOffset>,
    ) -> Result<SearchResult, SearchError> {
        if request.keyword.trim().is_empty() {
            return Err(SearchError::EmptyKeyword);
        }

        let sources = self.catalog.resolve(request.category);
        let spans_all = request.category == Category::All;

        let outcomes: Vec<(&FeedSource, Result<Vec<Entry>, FetchError>)> = stream::iter(sources)
            .then(|source| async move { (source, self.fetcher.fetch(&source.url).await) })
            .collect()
            .await;

        let mut entries = Vec::new();
        let mut failures = Vec::new();
        let mut seen_links = HashSet::new();

        for (source, outcome) in outcomes {
            match outcome {
                Ok(fetched) => {
                    tracing::debug!(
                        category = %source.category,
                        items = fetched.len(),
                        "Collected feed entries"
                    );
                    for mut entry in fetched {
                        // the same article can be listed under several categories
                        if spans_all
                            && !entry.link.is_empty()
                            && !seen_links.insert(entry.link.clone())
                        {
                            continue;
                        }
                        let label = if spans_all {
                            classify(&entry.link).or_source(source.category.label())
                        } else {
                            source.category.label()
                        };
                        entry.category = label.to_string();
                        entries.push(entry);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        category = %source.category,
                        url = %source.url,
                        error = %e,
                        "Feed fetch failed, continuing with remaining sources"
                    );
                    failures.push(SourceFailure {
                        category: source.category,
                        url: source.url.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        let stats = self.collect_stats(&entries);
        let keyword = request.keyword.to_lowercase();

        let mut items: Vec<ResultItem> = entries
            .into_iter()
            .filter(|entry| is_within(&entry.pub_date_raw, request.period_hours, now, self.zone))
            .filter(|entry| matches_keyword(entry, &keyword))
            .map(|entry| self.to_result_item(entry, now))
            .collect();
        sort_newest_first(&mut items);

        tracing::info!(
            keyword = %request.keyword,
            category = %request.category,
            collected = stats.total,
            matched = items.len(),
            failed_sources = failures.len(),
            "Search complete"
        );

        Ok(SearchResult {
            keyword: request.keyword.clone(),
            category: request.category,
            period_hours: request.period_hours,
            items,
            stats,
            failures,
        })
    }

    fn collect_stats(&self, entries: &[Entry]) -> FeedStats {
        let instants = entries
            .iter()
            .filter_map(|e| parse_in_zone(&e.pub_date_raw, self.zone))
            .map(|dt| dt.with_timezone(&self.zone));

        let mut stats = FeedStats {
            total: entries.len(),
            ..Default::default()
        };
        for dt in instants {
            stats.oldest = Some(stats.oldest.map_or(dt, |o| o.min(dt)));
            stats.newest = Some(stats.newest.map_or(dt, |n| n.max(dt)));
        }
        stats
    }

    fn to_result_item(&self, entry: Entry, now: DateTime<FixedOffset>) -> ResultItem {
        let published = parse_in_zone(&entry.pub_date_raw, self.zone);
        let display_time = match published {
            Some(dt) => format_absolute(dt, self.zone),
            None => entry.pub_date_raw.clone(),
        };
        let snippet = truncate_chars(&entry.description, self.description_limit).into_owned();

        ResultItem {
            published,
            display_time,
            relative_time: published.map(|dt| relative_time(now, dt)),
            snippet,
            entry,
        }
    }
}

/// Case-insensitive substring test against title and description.
///
/// `keyword_lower` must already be lower-cased.
pub fn matches_keyword(entry: &Entry, keyword_lower: &str) -> bool {
    entry.title.to_lowercase().contains(keyword_lower)
        || entry.description.to_lowercase().contains(keyword_lower)
}

/// Stable sort, newest first. Items without a parsed date go last, in their
/// original relative order.
pub fn sort_newest_first(items: &mut [ResultItem]) {
    items.sort_by(|a, b| b.published.cmp(&a.published));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::korea_standard_time;
    use chrono::{TimeDelta, TimeZone};
    use proptest::prelude::*;

    fn entry(title: &str, description: &str) -> Entry {
        Entry {
            title: title.to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn item(published: Option<DateTime<FixedOffset>>, title: &str) -> ResultItem {
        ResultItem {
            entry: entry(title, ""),
            published,
            display_time: String::new(),
            relative_time: None,
            snippet: String::new(),
        }
    }

    #[test]
    fn test_keyword_matches_title_or_description() {
        assert!(matches_keyword(&entry("기준금리 동결", ""), "금리"));
        assert!(matches_keyword(&entry("", "경제성장률 발표"), "경제"));
        assert!(!matches_keyword(&entry("올림픽 개막", "개막식"), "금리"));
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let e = entry("Samsung 반도체 AI 투자", "");
        assert!(matches_keyword(&e, &"ai 투자".to_lowercase()));
        assert!(matches_keyword(&e, &"SAMSUNG".to_lowercase()));
        assert!(matches_keyword(&entry("KOSPI 경제지표", ""), &"kospi 경제".to_lowercase()));
    }

    #[test]
    fn test_sort_puts_unparsable_last() {
        let zone = korea_standard_time();
        let base = zone.with_ymd_and_hms(2025, 7, 29, 12, 0, 0).unwrap();
        let mut items = vec![
            item(None, "undated-1"),
            item(Some(base - TimeDelta::hours(5)), "old"),
            item(Some(base), "new"),
            item(None, "undated-2"),
        ];
        sort_newest_first(&mut items);
        let titles: Vec<&str> = items.iter().map(|i| i.entry.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "old", "undated-1", "undated-2"]);
    }

    proptest! {
        #[test]
        fn prop_sort_is_idempotent(
            stamps in proptest::collection::vec(proptest::option::of(0i64..1_000_000), 0..30)
        ) {
            let zone = korea_standard_time();
            let mut items: Vec<ResultItem> = stamps
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let published = s.map(|secs| zone.timestamp_opt(secs, 0).unwrap());
                    item(published, &i.to_string())
                })
                .collect();

            sort_newest_first(&mut items);
            let once: Vec<String> = items.iter().map(|i| i.entry.title.clone()).collect();
            sort_newest_first(&mut items);
            let twice: Vec<String> = items.iter().map(|i| i.entry.title.clone()).collect();

            prop_assert_eq!(&once, &twice);
            prop_assert!(items.windows(2).all(|w| w[0].published >= w[1].published));
        }
    }
}

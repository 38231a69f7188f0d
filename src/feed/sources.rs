//! The fixed category catalog and period options.
//!
//! Both tables are compiled in. The catalog is a plain value rather than a
//! global so tests can point the same categories at a mock server.

use serde::Serialize;

/// A feed category as offered to the user.
///
/// `All` is the distinguished label that expands to every other source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    All,
    Politics,
    Economy,
    Society,
    International,
    Sports,
    Technology,
}

impl Category {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Politics => "Politics",
            Category::Economy => "Economy",
            Category::Society => "Society",
            Category::International => "International",
            Category::Sports => "Sports",
            Category::Technology => "IT/Science",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One category and the feed URL that serves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedSource {
    pub category: Category,
    pub url: String,
}

/// Ordered category → URL table.
///
/// Order matters: an all-categories search visits sources in this order, and
/// results carry their source alongside so the fallback label never depends
/// on completion order.
#[derive(Debug, Clone)]
pub struct SourceCatalog {
    sources: Vec<FeedSource>,
}

const YONHAP_FEEDS: [(Category, &str); 7] = [
    (Category::All, "https://www.yna.co.kr/rss/news.xml"),
    (Category::Politics, "https://www.yna.co.kr/rss/politics.xml"),
    (Category::Economy, "https://www.yna.co.kr/rss/economy.xml"),
    (Category::Society, "https://www.yna.co.kr/rss/society.xml"),
    (
        Category::International,
        "https://www.yna.co.kr/rss/international.xml",
    ),
    (Category::Sports, "https://www.yna.co.kr/rss/sports.xml"),
    (
        Category::Technology,
        "https://www.yna.co.kr/rss/technology.xml",
    ),
];

impl SourceCatalog {
    /// Builds a catalog from an explicit table, keeping the given order.
    pub fn new(sources: Vec<FeedSource>) -> Self {
        Self { sources }
    }

    /// The Yonhap News feeds the tool targets.
    pub fn yonhap() -> Self {
        Self::new(
            YONHAP_FEEDS
                .iter()
                .map(|(category, url)| FeedSource {
                    category: *category,
                    url: (*url).to_string(),
                })
                .collect(),
        )
    }

    /// Same categories as [`SourceCatalog::yonhap`], served from `base_url`.
    ///
    /// `base_url` replaces the scheme and host of every feed URL, e.g.
    /// `http://127.0.0.1:4000` yields `http://127.0.0.1:4000/rss/economy.xml`.
    pub fn yonhap_at(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self::new(
            YONHAP_FEEDS
                .iter()
                .map(|(category, url)| FeedSource {
                    category: *category,
                    url: format!(
                        "{}{}",
                        base,
                        url.trim_start_matches("https://www.yna.co.kr")
                    ),
                })
                .collect(),
        )
    }

    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    /// Sources to query for a request on `category`.
    ///
    /// A specific category yields its own source (or nothing if the catalog
    /// lacks it). `All` yields every other source in declared order.
    pub fn resolve(&self, category: Category) -> Vec<&FeedSource> {
        match category {
            Category::All => self
                .sources
                .iter()
                .filter(|s| s.category != Category::All)
                .collect(),
            specific => self
                .sources
                .iter()
                .filter(|s| s.category == specific)
                .take(1)
                .collect(),
        }
    }
}

impl Default for SourceCatalog {
    fn default() -> Self {
        Self::yonhap()
    }
}

/// Recency window choices offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Period {
    /// No time limit
    All,
    #[value(name = "1h")]
    Hours1,
    #[value(name = "3h")]
    Hours3,
    #[value(name = "6h")]
    Hours6,
    #[value(name = "12h")]
    Hours12,
    #[default]
    #[value(name = "24h")]
    Hours24,
    #[value(name = "3d")]
    Days3,
    #[value(name = "7d")]
    Days7,
}

impl Period {
    /// Window length in hours, `None` for no limit.
    pub fn hours(self) -> Option<u32> {
        match self {
            Period::All => None,
            Period::Hours1 => Some(1),
            Period::Hours3 => Some(3),
            Period::Hours6 => Some(6),
            Period::Hours12 => Some(12),
            Period::Hours24 => Some(24),
            Period::Days3 => Some(72),
            Period::Days7 => Some(168),
        }
    }

    /// Parses the short name used on the command line and in `config.toml`.
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(name, true).ok()
    }
}

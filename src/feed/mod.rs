//! Feed retrieval for the fixed Yonhap News sources.
//!
//! - [`sources`] - the category → URL catalog and the period options
//! - [`fetcher`] - one HTTP GET per feed, bounded by a timeout
//! - [`parser`] - `item` extraction with `quick-xml`
//!
//! # Example
//!
//! ```ignore
//! use yna_search::feed::{
//!     Category, FeedFetcher, SourceCatalog, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
//! };
//!
//! let catalog = SourceCatalog::yonhap();
//! let fetcher = FeedFetcher::new(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)?;
//! let entries = fetcher.fetch(&catalog.resolve(Category::Economy)[0].url).await?;
//! ```

mod fetcher;
mod parser;
mod sources;

pub use fetcher::{FeedFetcher, FetchError, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use parser::{parse_items, Entry, ParseError};
pub use sources::{Category, FeedSource, Period, SourceCatalog};

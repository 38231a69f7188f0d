//! Keyword and recency search over the Yonhap News RSS feeds.
//!
//! The crate is a single pipeline: fetch one or more category feeds, parse
//! their items, keep the entries that match a keyword inside an optional
//! time window, and sort them newest first with display-ready timestamps.
//!
//! - [`feed`] - the fixed source catalog, HTTP fetching and item parsing
//! - [`search`] - date parsing, recency filtering, classification and the pipeline
//! - [`config`] - optional `config.toml` settings
//! - [`render`] - terminal output for a finished [`search::SearchResult`]

pub mod config;
pub mod feed;
pub mod render;
pub mod search;
pub mod util;

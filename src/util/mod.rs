//! Utility functions for common operations.
//!
//! - **Markup stripping**: remove `<...>` spans from feed descriptions
//! - **Truncation**: character-count truncation with an ellipsis marker
//! - **Terminal safety**: drop control characters before printing feed text
//!
//! # Examples
//!
//! ```
//! use yna_search::util::{strip_tags, truncate_chars};
//!
//! assert_eq!(strip_tags("<b>Seoul</b> markets"), "Seoul markets");
//! assert_eq!(truncate_chars("abcdef", 3), "abc...");
//! ```

mod text;

pub use text::{strip_control_chars, strip_tags, truncate_chars, ELLIPSIS};

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use thiserror::Error;

use crate::util::strip_tags;

/// Deeper documents are rejected rather than walked.
const MAX_DEPTH: usize = 64;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed XML: {0}")]
    Xml(String),
    #[error("Document has no root element")]
    Empty,
    #[error("Unclosed element at end of document")]
    Unclosed,
    #[error("Nesting deeper than {0} levels")]
    TooDeep(usize),
    #[error("Document has more than one root element")]
    MultipleRoots,
    #[error("Text outside the root element")]
    ContentOutsideRoot,
}

/// Where the reader stands relative to the single root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Root {
    NotSeen,
    Open,
    Closed,
}

impl Root {
    /// Called for an element starting at depth 0.
    fn open(&mut self) -> Result<(), ParseError> {
        match self {
            Root::NotSeen => {
                *self = Root::Open;
                Ok(())
            }
            _ => Err(ParseError::MultipleRoots),
        }
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

/// One news item extracted from a feed.
///
/// Every text field defaults to an empty string when its element is missing.
/// `category` is empty until the search pipeline attaches one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub title: String,
    /// Plain text, `<...>` spans removed.
    pub description: String,
    pub link: String,
    /// The `pubDate` text exactly as the feed supplied it (trimmed).
    pub pub_date_raw: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Link,
    PubDate,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"description" => Some(Field::Description),
            b"link" => Some(Field::Link),
            b"pubDate" => Some(Field::PubDate),
            _ => None,
        }
    }
}

/// Fields collected for the item currently being read. The first occurrence
/// of each child wins.
#[derive(Default)]
struct ItemBuilder {
    depth: usize,
    title: Option<String>,
    description: Option<String>,
    link: Option<String>,
    pub_date: Option<String>,
    /// Field being read and the depth of its element.
    current: Option<(Field, usize, String)>,
}

impl ItemBuilder {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Link => &mut self.link,
            Field::PubDate => &mut self.pub_date,
        }
    }

    fn finish_field(&mut self, field: Field, text: String) {
        let slot = self.slot(field);
        if slot.is_none() {
            *slot = Some(text.trim().to_string());
        }
    }

    fn build(self) -> Entry {
        let description = self.description.unwrap_or_default();
        Entry {
            title: self.title.unwrap_or_default(),
            description: strip_tags(&description).into_owned(),
            link: self.link.unwrap_or_default(),
            pub_date_raw: self.pub_date.unwrap_or_default(),
            category: String::new(),
        }
    }
}

/// Parses an RSS document into entries.
///
/// Every `item` element at any depth becomes an [`Entry`], built from its
/// direct `title`, `description`, `link` and `pubDate` children. Namespace
/// prefixes are ignored when matching names. Text may be entity-escaped or
/// wrapped in CDATA; markup inside `description` is stripped afterwards.
///
/// The whole document must be well-formed: mismatched or unclosed tags,
/// undefined entities, bodies with no root element or several roots, and
/// text outside the root are all errors.
pub fn parse_items(bytes: &[u8]) -> Result<Vec<Entry>, ParseError> {
    // quick-xml (0.37) never expands <!ENTITY> declarations, so a DOCTYPE
    // cannot smuggle external content in; custom entity references fail
    // in unescape() instead.
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().check_end_names = true;

    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut depth: usize = 0;
    let mut root = Root::NotSeen;
    let mut item: Option<ItemBuilder> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if depth == 0 {
                    root.open()?;
                }
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(ParseError::TooDeep(MAX_DEPTH));
                }
                let local = e.local_name();
                if item.is_none() {
                    if local.as_ref() == b"item" {
                        item = Some(ItemBuilder {
                            depth,
                            ..Default::default()
                        });
                    }
                } else if let Some(builder) = item.as_mut() {
                    if builder.current.is_none() && depth == builder.depth + 1 {
                        if let Some(field) = Field::from_local_name(local.as_ref()) {
                            builder.current = Some((field, depth, String::new()));
                        }
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                if depth == 0 {
                    root.open()?;
                    root = Root::Closed;
                }
                // <item/> still counts as an item with every field empty
                if item.is_none() && e.local_name().as_ref() == b"item" {
                    entries.push(ItemBuilder::default().build());
                } else if let Some(builder) = item.as_mut() {
                    if builder.current.is_none() && depth == builder.depth {
                        if let Some(field) = Field::from_local_name(e.local_name().as_ref()) {
                            builder.finish_field(field, String::new());
                        }
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if depth == 0 && !is_blank(&t) {
                    return Err(ParseError::ContentOutsideRoot);
                }
                if let Some((_, field_depth, text)) =
                    item.as_mut().and_then(|b| b.current.as_mut())
                {
                    if *field_depth == depth {
                        let unescaped = t
                            .unescape()
                            .map_err(|e| ParseError::Xml(e.to_string()))?;
                        text.push_str(&unescaped);
                    }
                }
            }
            Ok(Event::CData(c)) => {
                if depth == 0 {
                    return Err(ParseError::ContentOutsideRoot);
                }
                if let Some((_, field_depth, text)) =
                    item.as_mut().and_then(|b| b.current.as_mut())
                {
                    if *field_depth == depth {
                        text.push_str(&String::from_utf8_lossy(&c));
                    }
                }
            }
            Ok(Event::End(_)) => {
                let mut item_closed = false;
                if let Some(builder) = item.as_mut() {
                    match builder.current.take() {
                        Some((field, field_depth, text)) if field_depth == depth => {
                            builder.finish_field(field, text);
                        }
                        Some(still_open) => builder.current = Some(still_open),
                        None => item_closed = builder.depth == depth,
                    }
                }
                if item_closed {
                    if let Some(done) = item.take() {
                        entries.push(done.build());
                    }
                }
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    root = Root::Closed;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if depth != 0 {
        return Err(ParseError::Unclosed);
    }
    if root == Root::NotSeen {
        return Err(ParseError::Empty);
    }

    Ok(entries)
}

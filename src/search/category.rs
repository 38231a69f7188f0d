//! Best-effort category inference from article URLs.
//!
//! Rules are plain substring tests on the lower-cased URL, evaluated top to
//! bottom; the first rule with a matching needle wins. Some needles could
//! plausibly overlap (a science story under a technology path), so the
//! table order is the tie-break. Reordering it changes results.
//!
//! Substring matching misfires on unrelated words that happen to contain a
//! needle (`"worldcup"` reads as international). That is accepted: the label
//! is only a display hint.

/// Outcome of classifying one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// A rule matched.
    Matched(&'static str),
    /// The URL is non-empty but no rule matched.
    General,
    /// The URL is empty.
    Unknown,
}

pub const GENERAL_LABEL: &str = "General";
pub const UNKNOWN_LABEL: &str = "Unknown";

const RULES: &[(&[&str], &str)] = &[
    (&["politics", "/pol/", "/politic"], "Politics"),
    (&["economy", "/eco/", "finance", "market"], "Economy"),
    (&["society", "/soc/", "local"], "Society"),
    (&["international", "/int/", "world"], "International"),
    (&["sports", "/spo/"], "Sports"),
    (&["technology", "/it/", "science"], "IT/Science"),
    (&["culture", "/cul/", "entertainment"], "Culture"),
];

/// Infers a category label from `link`.
pub fn classify(link: &str) -> Classification {
    if link.is_empty() {
        return Classification::Unknown;
    }
    let lowered = link.to_lowercase();
    RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lowered.contains(n)))
        .map(|(_, label)| Classification::Matched(*label))
        .unwrap_or(Classification::General)
}

impl Classification {
    /// Label of this classification, with no fallback.
    pub fn label(self) -> &'static str {
        match self {
            Classification::Matched(label) => label,
            Classification::General => GENERAL_LABEL,
            Classification::Unknown => UNKNOWN_LABEL,
        }
    }

    /// Label of this classification, or `source_label` when no rule matched.
    pub fn or_source(self, source_label: &'static str) -> &'static str {
        match self {
            Classification::Matched(label) => label,
            Classification::General | Classification::Unknown => source_label,
        }
    }
}

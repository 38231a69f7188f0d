use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker appended to text cut by [`truncate_chars`].
pub const ELLIPSIS: &str = "...";

/// Any `<...>` span on a single line, matched lazily.
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("static tag regex"));

/// Removes every `<...>` span from `s`.
///
/// This is a plain pattern substitution, not an HTML parser. Text that
/// contains a literal `<` followed later on the same line by `>` loses
/// everything in between, e.g. `"a < b and c > d"` becomes `"a  d"`.
/// Spans that cross a newline are left alone.
///
/// Returns `Cow::Borrowed` when nothing matched.
pub fn strip_tags(s: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(s, "")
}

/// Truncates `s` to at most `max_chars` characters (Unicode scalar values).
///
/// Appends [`ELLIPSIS`] only when characters were actually removed, so the
/// result of a cut is `max_chars + 3` characters long. Text at or under the
/// limit is returned borrowed and unmodified.
///
/// ```
/// use yna_search::util::truncate_chars;
///
/// assert_eq!(truncate_chars("기준금리 동결", 4), "기준금리...");
/// assert_eq!(truncate_chars("short", 10), "short");
/// ```
pub fn truncate_chars(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &s[..cut], ELLIPSIS)),
        None => Cow::Borrowed(s),
    }
}

/// Drops terminal control characters from feed-supplied text.
///
/// Removes C0 controls (except tab and newline), DEL, C1 controls and whole
/// `ESC [ ... final` CSI sequences so a hostile feed cannot recolour or move
/// the cursor when results are printed. Carriage returns are dropped too.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(is_unsafe_control) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // parameter and intermediate bytes, then one final byte in 0x40..=0x7e
                for p in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&p) {
                        break;
                    }
                }
            }
            continue;
        }
        if !is_unsafe_control(c) {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

fn is_unsafe_control(c: char) -> bool {
    c.is_control() && c != '\n' && c != '\t'
}

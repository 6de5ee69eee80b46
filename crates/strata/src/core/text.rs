//! Shared text utilities for labels
//!
//! Display widths are measured in terminal-style columns with `unicode-width`,
//! so CJK and emoji labels truncate at the same visual length as ASCII ones.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker appended to truncated labels
pub const ELLIPSIS: char = '…';

/// Truncate `text` to at most `max_width` display columns.
///
/// Text that fits is returned unchanged. Longer text is cut on a character
/// boundary and an ellipsis is appended; the ellipsis itself counts toward
/// the limit. A `max_width` of 0 disables truncation.
///
/// # Example
/// ```
/// use strata::core::truncate_label;
///
/// assert_eq!(truncate_label("short", 20), "short");
/// assert_eq!(truncate_label("abcdefghij", 5), "abcd…");
/// ```
pub fn truncate_label(text: &str, max_width: usize) -> String {
    if max_width == 0 || display_width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// True when the value carries its own surrounding double quotes
pub fn looks_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

/// Strip one pair of surrounding double quotes, if present
pub fn strip_quotes(value: &str) -> &str {
    if looks_quoted(value) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Display width of `text` in columns
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

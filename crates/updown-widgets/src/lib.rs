#![forbid(unsafe_code)]

//! Numeric up/down widget for updown.

pub mod config;
pub mod numeric_up_down;
pub mod parts;

pub use config::{ConfigError, NumericUpDownConfig};
pub use numeric_up_down::{Attachment, InputState, NumericUpDown, is_numeric_text};
pub use parts::{RepeatButton, TextField, TextPreview, UpDownParts};

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of `s` in terminal columns.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to `max_width` columns, ending in a single-cell ellipsis
/// when anything was cut.
pub(crate) fn ellipsize(s: &str, max_width: usize) -> Cow<'_, str> {
    let total = display_width(s);
    if total <= max_width {
        return Cow::Borrowed(s);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }
    if max_width == 1 {
        return Cow::Borrowed("…");
    }

    let mut out = String::new();
    let mut used = 0usize;
    let target = max_width - 1;

    for g in s.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if w == 0 {
            continue;
        }
        if used + w > target {
            break;
        }
        out.push_str(g);
        used += w;
    }

    out.push('…');
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipsize_short_is_borrowed() {
        let out = ellipsize("123", 3);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "123");
    }

    #[test]
    fn ellipsize_truncates_with_ellipsis() {
        assert_eq!(ellipsize("-2147483648", 5), "-214…");
    }

    #[test]
    fn ellipsize_degenerate_widths() {
        assert_eq!(ellipsize("12", 0), "");
        assert_eq!(ellipsize("12", 1), "…");
    }

    #[test]
    fn wide_graphemes_count_two_columns() {
        assert_eq!(display_width("５"), 2);
        assert_eq!(ellipsize("５５５", 4), "５…");
    }
}

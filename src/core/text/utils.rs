//! Text segmentation and truncation helpers.

use unicode_segmentation::UnicodeSegmentation;

use super::width::{grapheme_width, visible_width};

pub fn grapheme_segments(text: &str) -> unicode_segmentation::Graphemes<'_> {
    UnicodeSegmentation::graphemes(text, true)
}

pub fn is_whitespace_char(ch: char) -> bool {
    ch.is_whitespace()
}

/// Punctuation for word-wise cursor movement. Underscore counts as a word
/// character.
pub fn is_punctuation_char(ch: char) -> bool {
    ch.is_ascii_punctuation() && ch != '_'
}

/// Grapheme-safe truncation to a display width, with an optional trailing
/// ellipsis and optional right-padding to exactly `max_width`.
pub fn truncate_to_width(text: &str, max_width: usize, ellipsis: &str, pad: bool) -> String {
    if max_width == 0 {
        return String::new();
    }

    let text_width = visible_width(text);
    if text_width <= max_width {
        if pad {
            return format!("{text}{}", " ".repeat(max_width - text_width));
        }
        return text.to_string();
    }

    let ellipsis_width = visible_width(ellipsis);
    let target_width = max_width.saturating_sub(ellipsis_width);
    if target_width == 0 {
        return ellipsis.chars().take(max_width).collect();
    }

    let mut truncated = String::new();
    let mut current_width = 0;
    for grapheme in grapheme_segments(text) {
        let width = grapheme_width(grapheme);
        if current_width + width > target_width {
            break;
        }
        truncated.push_str(grapheme);
        current_width += width;
    }

    let mut result = format!("{truncated}{ellipsis}");
    if pad {
        let result_width = visible_width(&result);
        if result_width < max_width {
            result.push_str(&" ".repeat(max_width - result_width));
        }
    }
    result
}

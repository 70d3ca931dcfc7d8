//! Grapheme and visible width helpers.
//!
//! Widths are computed on plain text; theme closures run after layout, so no
//! escape-sequence scanning is needed here.

use emojis::get as emoji_get;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 3;

pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    if grapheme == "\t" {
        return TAB_WIDTH;
    }

    if emoji_get(grapheme).is_some() {
        return 2;
    }

    let mut width = 0;
    for ch in grapheme.chars() {
        if ch == '\t' {
            width += TAB_WIDTH;
            continue;
        }
        width += UnicodeWidthChar::width(ch).unwrap_or(0);
    }
    width
}

pub fn visible_width(input: &str) -> usize {
    if input.is_empty() {
        return 0;
    }

    let mut width = 0;
    for grapheme in input.graphemes(true) {
        width += grapheme_width(grapheme);
    }
    width
}

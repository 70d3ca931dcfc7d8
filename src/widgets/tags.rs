//! Tag strip for multi-select controls.
//!
//! Renders the selected options as removable tags and owns the one rule that
//! matters here: where focus lands after a tag is removed. The rule is a pure
//! function so it can be tested without a control around it.

use crate::core::text::width::visible_width;
use crate::theme::TagTheme;

/// Focus target after removing the tag at `removed` from a strip that now has
/// `remaining` tags. `None` means focus leaves the strip (the trigger takes
/// it).
pub fn focus_after_removal(removed: usize, remaining: usize) -> Option<usize> {
    if remaining == 0 {
        None
    } else if removed < remaining {
        Some(removed)
    } else {
        Some(remaining - 1)
    }
}

/// One line of tags, fitted to `width`. `focused` is the index of the focused
/// tag, if the strip holds focus. Tags that do not fit are elided.
pub fn render_tag_line(
    theme: &TagTheme,
    labels: &[&str],
    focused: Option<usize>,
    width: usize,
) -> String {
    let mut line = String::new();
    let mut used = 0;
    for (index, label) in labels.iter().enumerate() {
        let tag = format!("[{} ×]", label);
        let separator = usize::from(index > 0);
        let tag_width = visible_width(&tag) + separator;
        if used + tag_width > width {
            if used < width {
                line.push('…');
            }
            break;
        }
        if separator == 1 {
            line.push(' ');
        }
        let styled = if focused == Some(index) {
            (theme.focused)(&tag)
        } else {
            (theme.normal)(&tag)
        };
        line.push_str(&styled);
        used += tag_width;
    }
    line
}

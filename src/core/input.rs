//! Key parsing and matching for raw terminal byte sequences.
//!
//! This is a deliberately small surface: the controls bind plain keys, CSI
//! arrows/Home/End/Delete/Page keys, ctrl-letter chords, and alt-prefixed
//! printables. Extended keyboard protocols are the host's concern; unknown
//! sequences parse to `None` and are ignored by the widgets.

/// Whether a sequence is a key press, repeat, or release.
///
/// Legacy terminal input cannot signal repeat or release, so everything this
/// parser sees is a press; the variants exist so hosts with richer protocols
/// can synthesize events through [`crate::core::input_event::InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventType {
    Press,
    Repeat,
    Release,
}

/// Returns the normalized key id for a raw input sequence, if recognized.
///
/// Ids are lowercase names (`"up"`, `"enter"`, `"escape"`, ...) optionally
/// prefixed with `alt+` or `ctrl+`.
pub fn parse_key(data: &str) -> Option<String> {
    let simple = match data {
        "\r" | "\n" => Some("enter"),
        "\t" => Some("tab"),
        "\x1b[Z" => Some("shift+tab"),
        "\x1b" => Some("escape"),
        "\x7f" | "\x08" => Some("backspace"),
        "\x1b[A" | "\x1bOA" => Some("up"),
        "\x1b[B" | "\x1bOB" => Some("down"),
        "\x1b[C" | "\x1bOC" => Some("right"),
        "\x1b[D" | "\x1bOD" => Some("left"),
        "\x1b[H" | "\x1bOH" | "\x1b[1~" | "\x1b[7~" => Some("home"),
        "\x1b[F" | "\x1bOF" | "\x1b[4~" | "\x1b[8~" => Some("end"),
        "\x1b[3~" => Some("delete"),
        "\x1b[2~" => Some("insert"),
        "\x1b[5~" => Some("pageUp"),
        "\x1b[6~" => Some("pageDown"),
        _ => None,
    };
    if let Some(id) = simple {
        return Some(id.to_string());
    }

    // Ctrl chords: 0x01..=0x1a map to ctrl+a..ctrl+z, minus the sequences
    // already claimed above (tab, enter, escape).
    let mut chars = data.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        let code = ch as u32;
        if (0x01..=0x1a).contains(&code) && !matches!(code, 0x09 | 0x0d | 0x1b) {
            let letter = char::from_u32('a' as u32 + code - 1).expect("ascii letter");
            return Some(format!("ctrl+{letter}"));
        }
    }

    // Alt-prefixed printables: ESC followed by a single printable char.
    if let Some(rest) = data.strip_prefix('\x1b') {
        let mut rest_chars = rest.chars();
        if let (Some(ch), None) = (rest_chars.next(), rest_chars.next()) {
            if !ch.is_control() {
                if ch == ' ' {
                    return Some("alt+space".to_string());
                }
                return Some(format!("alt+{ch}"));
            }
        }
    }

    None
}

/// Returns whether a raw sequence matches a key id from a keybinding map.
///
/// `"space"` is special-cased because a plain space arrives as printable text
/// rather than a control sequence.
pub fn matches_key(data: &str, key_id: &str) -> bool {
    if key_id.is_empty() {
        return false;
    }
    if key_id == "space" {
        return data == " ";
    }
    parse_key(data).as_deref() == Some(key_id)
}

/// Returns decoded printable text for a raw sequence, if it carries any.
///
/// Control sequences and escape-prefixed data are not text.
pub fn parse_text(data: &str) -> Option<String> {
    if data.is_empty() {
        return None;
    }
    if data.chars().any(|ch| ch.is_control()) {
        return None;
    }
    Some(data.to_string())
}

#[cfg(test)]
mod tests {
    use super::{matches_key, parse_key, parse_text};

    #[test]
    fn plain_control_keys_parse() {
        assert_eq!(parse_key("\r").as_deref(), Some("enter"));
        assert_eq!(parse_key("\x1b").as_deref(), Some("escape"));
        assert_eq!(parse_key("\t").as_deref(), Some("tab"));
        assert_eq!(parse_key("\x7f").as_deref(), Some("backspace"));
    }

    #[test]
    fn csi_navigation_keys_parse() {
        assert_eq!(parse_key("\x1b[A").as_deref(), Some("up"));
        assert_eq!(parse_key("\x1b[B").as_deref(), Some("down"));
        assert_eq!(parse_key("\x1b[C").as_deref(), Some("right"));
        assert_eq!(parse_key("\x1b[D").as_deref(), Some("left"));
        assert_eq!(parse_key("\x1b[H").as_deref(), Some("home"));
        assert_eq!(parse_key("\x1b[F").as_deref(), Some("end"));
        assert_eq!(parse_key("\x1b[1~").as_deref(), Some("home"));
        assert_eq!(parse_key("\x1b[4~").as_deref(), Some("end"));
        assert_eq!(parse_key("\x1b[3~").as_deref(), Some("delete"));
    }

    #[test]
    fn ctrl_and_alt_chords_parse() {
        assert_eq!(parse_key("\x01").as_deref(), Some("ctrl+a"));
        assert_eq!(parse_key("\x06").as_deref(), Some("ctrl+f"));
        assert_eq!(parse_key("\x1bx").as_deref(), Some("alt+x"));
        assert_eq!(parse_key("\x1b ").as_deref(), Some("alt+space"));
    }

    #[test]
    fn printable_text_is_not_a_key() {
        assert_eq!(parse_key("a"), None);
        assert_eq!(parse_key("ab"), None);
        assert_eq!(parse_text("a").as_deref(), Some("a"));
        assert_eq!(parse_text("héllo").as_deref(), Some("héllo"));
        assert_eq!(parse_text("\x1b[A"), None);
    }

    #[test]
    fn matching_respects_the_space_special_case() {
        assert!(matches_key(" ", "space"));
        assert!(!matches_key(" ", "enter"));
        assert!(matches_key("\x1b[B", "down"));
        assert!(!matches_key("\x1b[B", "up"));
        assert!(!matches_key("x", ""));
    }
}

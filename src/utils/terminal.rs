//! Terminal output sanitization
//!
//! Message text comes straight from session files and may contain escape
//! sequences (tool output often does). The text formatter passes every piece of
//! user-controlled text through [`sanitize_for_terminal`] before printing.

use std::borrow::Cow;

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Removes ANSI escape sequences and control characters, keeping tabs and newlines
///
/// Handles CSI (`ESC [ ... letter`), OSC (`ESC ] ... BEL` or `ESC \`) and
/// two-character escapes. Returns the input unchanged (borrowed) when there is
/// nothing to strip.
///
/// # Examples
///
/// ```
/// use ai_history_query::utils::terminal::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[31merror\x1b[0m: build failed"), "error: build failed");
/// ```
pub fn sanitize_for_terminal(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_stripped_control) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.next() {
                // CSI: parameters until a final letter
                Some('[') => {
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() || next == '~' {
                            break;
                        }
                    }
                }
                // OSC: terminated by BEL or ESC '\'
                Some(']') => {
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if !is_stripped_control(ch) {
            result.push(ch);
        }
    }

    Cow::Owned(result)
}

fn is_stripped_control(ch: char) -> bool {
    ch.is_control() && ch != '\n' && ch != '\t' && ch != '\r'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        let text = "How do I rebase onto main?\n\tThanks";
        assert!(matches!(sanitize_for_terminal(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strips_colored_tool_output() {
        let text = "\x1b[1m\x1b[32mPASS\x1b[0m tests/app.rs";
        assert_eq!(sanitize_for_terminal(text), "PASS tests/app.rs");
    }

    #[test]
    fn test_strips_screen_clear_and_cursor_moves() {
        assert_eq!(sanitize_for_terminal("\x1b[2J\x1b[Hdone"), "done");
    }

    #[test]
    fn test_strips_osc_title_sequences() {
        assert_eq!(sanitize_for_terminal("\x1b]0;pwned\x07ok"), "ok");
        assert_eq!(sanitize_for_terminal("\x1b]8;;http://x\x1b\\link"), "link");
    }

    #[test]
    fn test_strips_bell_and_backspace() {
        assert_eq!(sanitize_for_terminal("ding\x07 back\x08"), "ding back");
    }

    #[test]
    fn test_keeps_unicode_and_whitespace() {
        let text = "Résumé 👋\r\n\x1b[31mred\x1b[0m";
        assert_eq!(sanitize_for_terminal(text), "Résumé 👋\r\nred");
    }
}

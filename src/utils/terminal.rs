//! Terminal output sanitization utilities
//!
//! # Security: Terminal Injection Prevention
//!
//! Message text comes straight from log files and may contain ANSI escape sequences that
//! clear the screen, move the cursor or restyle the terminal. Every CLI command that prints
//! message text passes it through [`preview_text`] (or [`strip_ansi_codes`]) first.

/// Drops CSI sequences and control characters, keeping tab, newline and carriage return
///
/// # Examples
///
/// ```
/// use ai_conversation_analyzer::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31mRed text\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "Red text");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Skip until the final byte of the CSI sequence
            while let Some(&next_ch) = chars.peek() {
                chars.next();
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Single-line, sanitized preview of message text, cut to `max_chars` characters
///
/// Whitespace runs (including newlines) collapse to one space. A trailing `…` marks
/// truncation.
///
/// # Examples
///
/// ```
/// use ai_conversation_analyzer::utils::terminal::preview_text;
///
/// assert_eq!(preview_text("line one\n\x1b[1mline two\x1b[0m", 100), "line one line two");
/// assert_eq!(preview_text("abcdef", 3), "abc…");
/// ```
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let clean = strip_ansi_codes(text);
    let collapsed = clean.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let mut truncated: String = collapsed.chars().take(max_chars).collect();
    truncated.push('…');
    truncated
}

//! Backslash escaping for leaf values.
//!
//! Every leaf string written into the text format goes through [`escape`], and
//! every leaf read back goes through [`unescape`]. Structural characters are
//! only meaningful when unescaped, so the splitter in [`super::split`] can skip
//! any character preceded by a backslash.

/// First character of a comment line produced by the codec itself.
///
/// Lines starting with this marker are regenerated on every save and dropped on load.
pub const GENERATED_MARKER: char = '\u{200B}';

/// Characters escaped inside arrays, lists and compounds.
pub const SPECIALS: &[char] = &[',', '[', ']', '<', '>'];

/// Characters escaped in a plain entry value (`S:key=value`).
///
/// Only the multiline brackets matter there: a value starting with `<` would
/// otherwise open a continuation.
pub const VALUE_SPECIALS: &[char] = &['<', '>'];

/// Escapes `text` so that it round-trips through the line grammar.
///
/// Backslashes and control characters are always escaped, spaces at either end
/// become `\s` (lines and fragments are trimmed on read), and every character in
/// `specials` is prefixed with a backslash.
#[must_use]
pub fn escape(text: &str, specials: &[char]) -> String {
    let mut out = String::with_capacity(text.len());
    let last = text.chars().count().saturating_sub(1);

    for (index, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' ' if index == 0 || index == last => out.push_str("\\s"),
            c if specials.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }

    out
}

/// Escapes a single element of a delimited sequence.
///
/// An empty element is written as `\e` so that it is not confused with an
/// empty sequence. A `:` in second position is escaped too: wrapped elements
/// start their own line, and `X:` there would read as a new entry.
#[must_use]
pub fn escape_element(text: &str, specials: &[char]) -> String {
    if text.is_empty() {
        return "\\e".to_string();
    }
    let escaped = escape(text, specials);
    let mut chars = escaped.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(':')) => format!("{first}\\:{}", chars.as_str()),
        _ => escaped,
    }
}

/// Reverses [`escape`] and [`escape_element`].
///
/// Unknown escapes resolve to the escaped character itself; a dangling
/// backslash at the end of the input is kept literally.
#[must_use]
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('s') => out.push(' '),
            Some('e') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// Returns `true` if `line` ends with `end` and that character is not escaped.
#[must_use]
pub fn ends_with_unescaped(line: &str, end: char) -> bool {
    let Some(body) = line.strip_suffix(end) else {
        return false;
    };
    let backslashes = body.chars().rev().take_while(|&c| c == '\\').count();
    backslashes % 2 == 0
}

//! Bracket-aware splitting of delimited fragments.
//!
//! A single scanner drives every helper here: it skips escaped characters,
//! tracks `[`/`]` depth exactly once per level, and only reacts to the target
//! character at depth zero. Nested compounds and lists therefore never leak
//! their inner delimiters into the enclosing level.

use thiserror::Error;

/// Structural error raised while scanning bracketed text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// A `]` appeared without a matching `[`.
    #[error("Unexpected ']' at byte {position}")]
    UnexpectedClose {
        /// Byte offset of the offending bracket.
        position: usize,
    },

    /// Input ended with open brackets.
    #[error("{depth} bracket(s) left unclosed")]
    Unclosed {
        /// Nesting depth at end of input.
        depth: usize,
    },
}

/// Walks `text` and reports each top-level occurrence of `target`.
///
/// The callback receives the byte offset and returns `false` to stop early.
fn scan(
    text: &str,
    target: char,
    mut on_match: impl FnMut(usize) -> bool,
) -> Result<(), SplitError> {
    let mut depth = 0usize;
    let mut escaped = false;

    for (position, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(SplitError::UnexpectedClose { position })?;
                if depth == 0 && target == ']' && !on_match(position) {
                    return Ok(());
                }
            }
            c if c == target && depth == 0 => {
                if !on_match(position) {
                    return Ok(());
                }
            }
            _ => {}
        }
    }

    if depth == 0 {
        Ok(())
    } else {
        Err(SplitError::Unclosed { depth })
    }
}

/// Splits `text` on top-level commas and trims every fragment.
///
/// Blank input yields no fragments; a single trailing empty fragment (from a
/// trailing comma) is dropped. Fragments keep their escapes; callers unescape
/// leaves once they reach them.
///
/// # Errors
///
/// Returns an error if the brackets in `text` are unbalanced.
pub fn split_elements(text: &str) -> Result<Vec<&str>, SplitError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut parts = Vec::new();
    let mut start = 0;
    scan(text, ',', |position| {
        parts.push(text[start..position].trim());
        start = position + 1;
        true
    })?;

    let tail = text[start..].trim();
    if !tail.is_empty() || parts.is_empty() {
        parts.push(tail);
    }

    Ok(parts)
}

/// Returns the byte offset of the first top-level, unescaped `target`.
///
/// Unbalanced brackets are treated as "not found".
#[must_use]
pub fn find_top_level(text: &str, target: char) -> Option<usize> {
    let mut found = None;
    scan(text, target, |position| {
        found = Some(position);
        false
    })
    .ok()?;
    found
}

/// Strips one pair of enclosing brackets from `text`.
///
/// Returns `None` unless `text` starts with `[` and the bracket matching it is
/// the final character.
#[must_use]
pub fn strip_brackets(text: &str) -> Option<&str> {
    let text = text.trim();
    if !text.starts_with('[') {
        return None;
    }

    let mut close = None;
    scan(text, ']', |position| {
        close = Some(position);
        false
    })
    .ok()?;

    match close {
        Some(position) if position == text.len() - 1 => Some(&text[1..position]),
        _ => None,
    }
}

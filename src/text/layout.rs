//! Multiline policy and line layout.

use serde::Deserialize;

/// Global rule controlling whether array-like values wrap across lines.
///
/// Applies uniformly to array entries and to newline-flagged compound/list
/// schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultilinePolicy {
    /// Always write a single line.
    Disabled,

    /// One element per line.
    #[serde(alias = "always")]
    AlwaysMultiline,

    /// Single line while it fits the line width, otherwise wrap and pack
    /// elements greedily.
    #[default]
    #[serde(alias = "if_too_long")]
    MultilineIfTooLong,
}

/// Layout parameters used when rendering values.
///
/// # Example
///
/// ```
/// use structcfg::text::{MultilinePolicy, TextLayout};
///
/// let layout = TextLayout::new(MultilinePolicy::AlwaysMultiline).with_indent(2);
/// let elements = vec!["a".to_string(), "b".to_string()];
///
/// assert!(layout.should_wrap(&elements, true, 0));
/// assert_eq!(layout.body(&elements, 0), "  a,\n  b");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayout {
    /// Wrapping rule.
    pub policy: MultilinePolicy,

    /// Width budget for [`MultilinePolicy::MultilineIfTooLong`].
    pub line_width: usize,

    /// Spaces per nesting level.
    pub indent: usize,
}

impl TextLayout {
    /// Default width budget (75 columns).
    pub const DEFAULT_LINE_WIDTH: usize = 75;

    /// Default indentation (4 spaces).
    pub const DEFAULT_INDENT: usize = 4;

    /// Creates a layout with the given policy and default width and indent.
    #[must_use]
    pub const fn new(policy: MultilinePolicy) -> Self {
        Self {
            policy,
            line_width: Self::DEFAULT_LINE_WIDTH,
            indent: Self::DEFAULT_INDENT,
        }
    }

    /// Layout that never wraps.
    #[must_use]
    pub const fn single_line() -> Self {
        Self::new(MultilinePolicy::Disabled)
    }

    /// Sets the width budget.
    #[must_use]
    pub const fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Sets the indentation per level.
    #[must_use]
    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Leading whitespace for the given nesting level.
    #[must_use]
    pub fn indentation(&self, level: usize) -> String {
        " ".repeat(self.indent * level)
    }

    /// Decides whether a sequence of rendered elements must be wrapped.
    ///
    /// `used` is the column at which the single-line form would start.
    /// Elements that already span lines force wrapping regardless of
    /// `newlined`.
    #[must_use]
    pub fn should_wrap(&self, elements: &[String], newlined: bool, used: usize) -> bool {
        self.wraps(elements, newlined, used + 2)
    }

    /// Like [`Self::should_wrap`], for sequences written without brackets.
    #[must_use]
    pub fn should_wrap_unbracketed(&self, elements: &[String], used: usize) -> bool {
        self.wraps(elements, true, used)
    }

    fn wraps(&self, elements: &[String], newlined: bool, used: usize) -> bool {
        if elements.is_empty() || self.policy == MultilinePolicy::Disabled {
            return false;
        }
        if elements.iter().any(|e| e.contains('\n')) {
            return true;
        }
        if !newlined {
            return false;
        }
        match self.policy {
            MultilinePolicy::AlwaysMultiline => true,
            MultilinePolicy::MultilineIfTooLong => used + joined_len(elements) > self.line_width,
            MultilinePolicy::Disabled => false,
        }
    }

    /// Renders the wrapped body: elements at `level + 1`, separated by commas.
    ///
    /// Under [`MultilinePolicy::MultilineIfTooLong`] single-line elements are
    /// packed greedily up to the width budget; otherwise each element gets its
    /// own line. The result has no trailing newline.
    #[must_use]
    pub fn body(&self, elements: &[String], level: usize) -> String {
        let pad = self.indentation(level + 1);
        let pack = self.policy == MultilinePolicy::MultilineIfTooLong;
        let last = elements.len().saturating_sub(1);

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        for (index, element) in elements.iter().enumerate() {
            let piece = if index == last {
                element.clone()
            } else {
                format!("{element},")
            };
            let packable = pack && !element.contains('\n');

            if packable
                && !current.is_empty()
                && pad.len() + current.len() + 1 + piece.len() <= self.line_width
            {
                current.push(' ');
                current.push_str(&piece);
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if packable {
                current = piece;
            } else {
                lines.push(piece);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }

        lines
            .iter()
            .map(|line| format!("{pad}{line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders a bracketed sequence, wrapping when [`Self::should_wrap`] says so.
    #[must_use]
    pub fn bracketed(
        &self,
        elements: &[String],
        newlined: bool,
        level: usize,
        used: usize,
    ) -> String {
        if self.should_wrap(elements, newlined, used) {
            format!(
                "[\n{}\n{}]",
                self.body(elements, level),
                self.indentation(level)
            )
        } else {
            format!("[{}]", elements.join(", "))
        }
    }
}

impl Default for TextLayout {
    fn default() -> Self {
        Self::new(MultilinePolicy::default())
    }
}

/// Length of the elements joined with `, `.
fn joined_len(elements: &[String]) -> usize {
    elements.iter().map(String::len).sum::<usize>() + 2 * elements.len().saturating_sub(1)
}

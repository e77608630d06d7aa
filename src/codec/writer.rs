//! Line encoder for entries and section headers.

use crate::entry::ConfigEntry;
use crate::text::{GENERATED_MARKER, TextLayout};
use crate::tree::ConfigSection;

/// Renders entries and section headers.
///
/// Output is always regenerated from memory: user comments, one generated
/// comment per limitation line, then `X:key=value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigWriter {
    layout: TextLayout,
    keep_unused: bool,
}

impl ConfigWriter {
    /// Writer with the given layout that keeps unused content.
    #[must_use]
    pub const fn new(layout: TextLayout) -> Self {
        Self {
            layout,
            keep_unused: true,
        }
    }

    /// Whether entries and sections that code never registered are written.
    #[must_use]
    pub const fn with_keep_unused(mut self, keep_unused: bool) -> Self {
        self.keep_unused = keep_unused;
        self
    }

    /// Layout applied to values.
    #[must_use]
    pub const fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// See [`Self::with_keep_unused`].
    #[must_use]
    pub const fn keeps_unused(&self) -> bool {
        self.keep_unused
    }

    /// Renders one entry: comments, generated limitations and the value line.
    #[must_use]
    pub fn entry_block(&self, entry: &ConfigEntry) -> String {
        let mut lines: Vec<String> = entry.comment().iter().map(|c| comment_line(c)).collect();
        lines.extend(
            entry
                .limitations()
                .iter()
                .flat_map(|text| text.lines())
                .map(|line| format!("# {GENERATED_MARKER}{line}")),
        );

        let key = entry.key();
        let used = key.chars().count() + 3;
        lines.push(format!(
            "{}:{key}={}",
            entry.prefix(),
            entry.serialize_value(&self.layout, used)
        ));
        lines.join("\n")
    }

    /// Renders a section's comments and its `[path]` header.
    #[must_use]
    pub fn section_header(&self, section: &ConfigSection) -> String {
        let mut lines: Vec<String> = section.comment().iter().map(|c| comment_line(c)).collect();
        lines.push(format!("[{}]", section.path()));
        lines.join("\n")
    }
}

impl Default for ConfigWriter {
    fn default() -> Self {
        Self::new(TextLayout::default())
    }
}

fn comment_line(text: &str) -> String {
    if text.is_empty() {
        "#".to_string()
    } else {
        format!("# {text}")
    }
}

//! Line decoder for config files.

use serde::Serialize;
use tracing::{debug, error};

use crate::entry::ConfigEntry;
use crate::text::{GENERATED_MARKER, ends_with_unescaped};
use crate::tree::{Config, ConfigSection};

use super::registry::ParserRegistry;

/// A line that was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number of the entry (its first line for multiline values).
    pub line: usize,
    /// Human-readable cause.
    pub reason: String,
}

/// Outcome of reading one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Entry lines applied to the tree.
    pub loaded: usize,
    /// Lines that were logged and ignored.
    pub skipped: Vec<SkippedLine>,
}

impl LoadReport {
    /// Returns `true` if no line was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    fn skip(&mut self, line: usize, reason: impl Into<String>) {
        let reason = reason.into();
        error!(line, %reason, "Skipping config line");
        self.skipped.push(SkippedLine { line, reason });
    }
}

/// One `X:key=value` entry, with its value joined across continuation lines.
struct EntryLine<'a> {
    prefix: char,
    key: &'a str,
    raw: String,
    comments: Vec<String>,
}

/// Decodes config text into a [`Config`].
///
/// Reading never fails as a whole: every malformed line is logged, recorded
/// in the [`LoadReport`] and skipped, and the rest of the file still loads.
///
/// # Example
///
/// ```
/// use structcfg::codec::{ConfigReader, ParserRegistry};
/// use structcfg::tree::Config;
///
/// let registry = ParserRegistry::default();
/// let mut config = Config::new("demo")?;
/// let report = ConfigReader::new(&registry).read(&mut config, "[server]\nI:port=25565\n");
///
/// assert!(report.is_clean());
/// let port = config.section_by_path("server").and_then(|s| s.entry("port"));
/// assert_eq!(port.and_then(|e| e.as_int()).map(|v| v.get()), Some(25565));
/// # Ok::<(), structcfg::tree::TreeError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigReader<'r> {
    registry: &'r ParserRegistry,
}

impl<'r> ConfigReader<'r> {
    /// Creates a reader resolving unknown keys through `registry`.
    #[must_use]
    pub const fn new(registry: &'r ParserRegistry) -> Self {
        Self { registry }
    }

    /// Reads `text` into `config`.
    pub fn read(&self, config: &mut Config, text: &str) -> LoadReport {
        let lines: Vec<&str> = text.lines().collect();
        let mut report = LoadReport::default();
        let mut comments: Vec<String> = Vec::new();
        let mut current: Option<String> = None;
        let mut index = 0;

        while index < lines.len() {
            let number = index + 1;
            let line = lines[index].trim();
            index += 1;

            if line.is_empty() {
                continue;
            }

            if let Some(body) = line.strip_prefix('#') {
                let body = body.strip_prefix(' ').unwrap_or(body);
                if !body.starts_with(GENERATED_MARKER) {
                    comments.push(body.to_string());
                }
                continue;
            }

            if let Some(path) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let segments: Vec<&str> = path.split('.').map(str::trim).collect();
                current = match config.section_recursive(&segments) {
                    Ok(section) => {
                        if !section.is_used() && !comments.is_empty() {
                            section.set_comment_lines(&comments);
                        }
                        Some(section.path())
                    }
                    Err(err) => {
                        report.skip(number, format!("Invalid section header: {err}"));
                        None
                    }
                };
                comments.clear();
                continue;
            }

            let taken = std::mem::take(&mut comments);
            let Some((prefix, key, value)) = split_entry_line(line) else {
                report.skip(number, "Not a section header, comment or entry");
                continue;
            };

            let Some(raw) = self.continue_value(value, &lines, &mut index) else {
                report.skip(number, format!("Unterminated multiline value for '{key}'"));
                continue;
            };

            let Some(section) = current.as_deref().and_then(|p| config.section_by_path_mut(p)) else {
                report.skip(number, format!("Entry '{key}' is outside of any section"));
                continue;
            };

            let entry = EntryLine {
                prefix,
                key,
                raw,
                comments: taken,
            };
            match self.apply(section, entry) {
                Ok(()) => report.loaded += 1,
                Err(reason) => report.skip(number, reason),
            }
        }

        debug!(
            config = config.name(),
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "Config text read"
        );
        report
    }

    /// Joins the continuation lines of a value opening with `<`.
    ///
    /// Returns `None` if the block is cut short by another entry line or by
    /// the end of the text; the interrupting line is left unconsumed.
    fn continue_value(&self, value: &str, lines: &[&str], index: &mut usize) -> Option<String> {
        let mut raw = value.to_string();
        if !value.starts_with('<') || ends_with_unescaped(value, '>') {
            return Some(raw);
        }
        while let Some(next) = lines.get(*index) {
            if self.is_entry_line(next.trim()) {
                return None;
            }
            raw.push('\n');
            raw.push_str(next.trim_end());
            *index += 1;
            if ends_with_unescaped(next.trim(), '>') {
                return Some(raw);
            }
        }
        None
    }

    fn apply(&self, section: &mut ConfigSection, line: EntryLine<'_>) -> Result<(), String> {
        let existing = section.entry(line.key).map(|e| (e.prefix(), e.is_used()));

        match existing {
            Some((prefix, _)) if prefix == line.prefix => {
                let Some(entry) = section.entry_mut(line.key) else {
                    return Ok(());
                };
                entry.set_text(&line.raw).map_err(|err| err.to_string())?;
                if !entry.is_used() {
                    entry.set_comment_lines(&line.comments);
                }
                Ok(())
            }
            Some((prefix, true)) => Err(format!(
                "Entry '{}' expects prefix '{prefix}', found '{}'",
                line.key, line.prefix
            )),
            Some((_, false)) => {
                let entry = self.create(&line)?;
                if let Some(slot) = section.entry_mut(line.key) {
                    *slot = entry;
                }
                Ok(())
            }
            None => {
                let entry = self.create(&line)?;
                section.add(entry);
                Ok(())
            }
        }
    }

    fn create(&self, line: &EntryLine<'_>) -> Result<ConfigEntry, String> {
        let Some(result) = self.registry.parse(line.prefix, line.key, &line.raw) else {
            error!(
                fatal = true,
                prefix = %line.prefix,
                key = line.key,
                "No parser registered for prefix"
            );
            return Err(format!("No parser registered for prefix '{}'", line.prefix));
        };
        let mut entry = result.map_err(|err| err.to_string())?;
        entry.set_used(false);
        entry.set_comment_lines(&line.comments);
        entry.snapshot();
        Ok(entry)
    }

    /// A line that starts a new entry: `X:` with a registered prefix `X`.
    fn is_entry_line(&self, line: &str) -> bool {
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(prefix), Some(':')) => self.registry.contains(prefix),
            _ => false,
        }
    }
}

/// Splits `X:key=value` into prefix, key and trimmed value.
fn split_entry_line(line: &str) -> Option<(char, &str, &str)> {
    let mut chars = line.chars();
    let prefix = chars.next()?;
    if chars.next()? != ':' {
        return None;
    }
    let (key, value) = chars.as_str().split_once('=')?;
    if key.is_empty() {
        return None;
    }
    Some((prefix, key, value.trim()))
}

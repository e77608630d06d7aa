//! Sections: named groups of entries and child sections.

use tracing::{debug, warn};

use crate::codec::ConfigWriter;
use crate::entry::{ConfigEntry, SyncKind};
use crate::text::TextLayout;

use super::error::{TreeError, validate_section_name};

/// A named group of entries and child sections.
///
/// Entries and children keep insertion order. A section created by code is
/// `used`; one created while reading a file is not, and is written back only
/// when the writer keeps unused content.
#[derive(Debug, Clone)]
pub struct ConfigSection {
    name: String,
    parent: Option<String>,
    comment: Vec<String>,
    entries: Vec<ConfigEntry>,
    sections: Vec<ConfigSection>,
    used: bool,
}

impl ConfigSection {
    /// Creates a detached section registered by code.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidName`] for empty names, padded names and
    /// names containing `.`, brackets or line breaks.
    pub fn new(name: impl Into<String>) -> Result<Self, TreeError> {
        let name = name.into();
        validate_section_name(&name)?;
        Ok(Self {
            name,
            parent: None,
            comment: Vec::new(),
            entries: Vec::new(),
            sections: Vec::new(),
            used: true,
        })
    }

    /// Creates a section on behalf of a path lookup or a file header.
    pub(crate) fn implicit(name: &str) -> Result<Self, TreeError> {
        let mut section = Self::new(name)?;
        section.used = false;
        Ok(section)
    }

    /// Replaces the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.set_comment(comment);
        self
    }

    /// Adds an entry (see [`Self::add`]).
    #[must_use]
    pub fn with_entry(mut self, entry: ConfigEntry) -> Self {
        self.add(entry);
        self
    }

    /// Adds a child section (see [`Self::add_section`]).
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::AlreadyAttached`] if `section` already has a parent.
    pub fn with_section(mut self, section: Self) -> Result<Self, TreeError> {
        self.add_section(section)?;
        Ok(self)
    }

    /// Section name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted path from the root, e.g. `server.limits`.
    #[must_use]
    pub fn path(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{parent}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// Path of the parent section, if attached to one.
    #[must_use]
    pub fn parent_path(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Comment lines.
    #[must_use]
    pub fn comment(&self) -> &[String] {
        &self.comment
    }

    /// Replaces the comment, one line per line of `comment`.
    pub fn set_comment(&mut self, comment: &str) {
        self.comment = comment.lines().map(str::to_string).collect();
    }

    /// Replaces the comment lines.
    pub fn set_comment_lines(&mut self, lines: &[String]) {
        self.comment = lines
            .iter()
            .flat_map(|line| line.lines().map(str::to_string))
            .collect();
    }

    /// Whether code registered this section.
    #[must_use]
    pub const fn is_used(&self) -> bool {
        self.used
    }

    /// Sets the `used` flag.
    pub const fn set_used(&mut self, used: bool) {
        self.used = used;
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    /// Mutable entries in insertion order.
    pub fn entries_mut(&mut self) -> &mut [ConfigEntry] {
        &mut self.entries
    }

    /// Entry by key.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&ConfigEntry> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    /// Mutable entry by key.
    pub fn entry_mut(&mut self, key: &str) -> Option<&mut ConfigEntry> {
        self.entries.iter_mut().find(|entry| entry.key() == key)
    }

    /// Removes an entry, returning it.
    pub fn remove(&mut self, key: &str) -> Option<ConfigEntry> {
        let index = self.entries.iter().position(|entry| entry.key() == key)?;
        Some(self.entries.remove(index))
    }

    /// Adds an entry, reconciling it with one already stored under its key.
    ///
    /// - A placeholder, or an unused entry of the same type, has its text
    ///   re-parsed into `entry`, which replaces it.
    /// - An entry of another type is replaced by `entry`.
    /// - An entry already registered with the same type is kept.
    ///
    /// The stored entry is marked used in every case and returned.
    pub fn add(&mut self, entry: ConfigEntry) -> &mut ConfigEntry {
        let index = match self.entries.iter().position(|e| e.key() == entry.key()) {
            Some(index) => {
                self.merge_entry(index, entry);
                index
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    fn merge_entry(&mut self, index: usize, mut incoming: ConfigEntry) {
        let path = self.path();
        let existing = &mut self.entries[index];
        incoming.set_used(true);

        if existing.value().is_unresolved()
            || (!existing.is_used() && existing.prefix() == incoming.prefix())
        {
            let text = existing.serialize_value(&TextLayout::single_line(), 0);
            if let Err(error) = incoming.set_text(&text) {
                warn!(
                    section = %path,
                    key = incoming.key(),
                    %error,
                    "Stored value does not fit the registered entry, using its default"
                );
            }
            incoming.snapshot();
            *existing = incoming;
        } else if existing.prefix() != incoming.prefix() {
            debug!(
                section = %path,
                key = incoming.key(),
                from = %existing.prefix(),
                to = %incoming.prefix(),
                "Entry type changed, replacing stored entry"
            );
            *existing = incoming;
        } else {
            existing.set_used(true);
        }
    }

    /// Child sections in insertion order.
    #[must_use]
    pub fn sections(&self) -> &[Self] {
        &self.sections
    }

    /// Child section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Self> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Mutable child section by name.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut Self> {
        self.sections.iter_mut().find(|section| section.name == name)
    }

    /// Attaches a child section.
    ///
    /// If a child with the same name exists, `section` is merged into it:
    /// entries go through [`Self::add`] and children merge recursively.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::AlreadyAttached`] if `section` already has a parent.
    pub fn add_section(&mut self, mut section: Self) -> Result<&mut Self, TreeError> {
        if let Some(parent) = &section.parent {
            return Err(TreeError::AlreadyAttached {
                name: section.name,
                parent: parent.clone(),
            });
        }
        let index = match self.sections.iter().position(|s| s.name == section.name) {
            Some(index) => {
                self.sections[index].merge(section);
                index
            }
            None => {
                section.reparent(Some(self.path()));
                self.sections.push(section);
                self.sections.len() - 1
            }
        };
        Ok(&mut self.sections[index])
    }

    /// Walks `path` below this section, creating missing sections on the way.
    ///
    /// An empty path returns `self`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidName`] if a missing segment is not a valid
    /// section name.
    pub fn section_recursive<S: AsRef<str>>(&mut self, path: &[S]) -> Result<&mut Self, TreeError> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(self);
        };
        let name = first.as_ref();
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                let mut child = Self::implicit(name)?;
                child.reparent(Some(self.path()));
                self.sections.push(child);
                self.sections.len() - 1
            }
        };
        self.sections[index].section_recursive(rest)
    }

    pub(crate) fn merge(&mut self, other: Self) {
        if other.used {
            self.used = true;
            self.comment = other.comment;
        }
        for entry in other.entries {
            self.add(entry);
        }
        for child in other.sections {
            match self.sections.iter().position(|s| s.name == child.name) {
                Some(index) => self.sections[index].merge(child),
                None => {
                    let mut child = child;
                    child.reparent(Some(self.path()));
                    self.sections.push(child);
                }
            }
        }
    }

    pub(crate) fn reparent(&mut self, parent: Option<String>) {
        self.parent = parent;
        let path = self.path();
        for child in &mut self.sections {
            child.reparent(Some(path.clone()));
        }
    }

    /// Returns `true` if any used entry below this section changed.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.entries.iter().any(ConfigEntry::has_changed)
            || self.sections.iter().any(Self::has_changed)
    }

    /// Restores every entry below this section to its default.
    pub fn reset_all(&mut self) {
        for entry in &mut self.entries {
            entry.reset();
        }
        for child in &mut self.sections {
            child.reset_all();
        }
    }

    /// Snapshots every entry below this section.
    pub fn snapshot_all(&mut self) {
        for entry in &mut self.entries {
            entry.snapshot();
        }
        for child in &mut self.sections {
            child.snapshot_all();
        }
    }

    pub(crate) fn collect_synced<'a>(&'a self, kind: SyncKind, out: &mut Vec<(String, &'a ConfigEntry)>) {
        let path = self.path();
        for entry in self.entries.iter().filter(|e| e.sync() == kind) {
            out.push((format!("{path}.{}", entry.key()), entry));
        }
        for child in &self.sections {
            child.collect_synced(kind, out);
        }
    }

    pub(crate) fn collect_synced_mut<'a>(
        &'a mut self,
        kind: SyncKind,
        out: &mut Vec<(String, &'a mut ConfigEntry)>,
    ) {
        let path = self.path();
        for entry in self.entries.iter_mut().filter(|e| e.sync() == kind) {
            out.push((format!("{path}.{}", entry.key()), entry));
        }
        for child in &mut self.sections {
            child.collect_synced_mut(kind, out);
        }
    }

    /// Renders this section and everything below it.
    ///
    /// Returns `None` when nothing qualifies for output, so empty subtrees
    /// disappear without the caller checking for them.
    #[must_use]
    pub fn serialize(&self, writer: &ConfigWriter) -> Option<String> {
        let keep = writer.keeps_unused();
        if !self.used && !keep {
            return None;
        }

        let entries: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| keep || entry.is_used())
            .map(|entry| writer.entry_block(entry))
            .collect();
        let children: Vec<String> = self
            .sections
            .iter()
            .filter_map(|section| section.serialize(writer))
            .collect();
        if entries.is_empty() && children.is_empty() {
            return None;
        }

        let mut head = writer.section_header(self);
        if !entries.is_empty() {
            head.push('\n');
            head.push_str(&entries.join("\n\n"));
        }
        let mut blocks = vec![head];
        blocks.extend(children);
        Some(blocks.join("\n\n"))
    }
}

//! The section tree of a configuration.
//!
//! A [`Config`] is a named forest of [`ConfigSection`]s; each section holds
//! entries and child sections. Sections are addressed by dotted paths
//! (`server.limits`), which is also how they appear in file headers.

mod error;
mod section;

#[cfg(test)]
mod tree_tests;

pub use error::TreeError;
pub use section::ConfigSection;

use crate::codec::ConfigWriter;
use crate::entry::{ConfigEntry, SyncKind};

use error::validate_config_name;

/// A named configuration: the root of a section tree.
///
/// # Example
///
/// ```
/// use structcfg::codec::ConfigWriter;
/// use structcfg::entry::{ConfigEntry, IntValue};
/// use structcfg::tree::{Config, ConfigSection};
///
/// let mut config = Config::new("demo")?;
/// let server = ConfigSection::new("server")?
///     .with_entry(ConfigEntry::new("port", IntValue::new(8080))?);
/// config.add_section(server)?;
///
/// assert_eq!(config.serialize(&ConfigWriter::default()), "[server]\nI:port=8080\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    sections: Vec<ConfigSection>,
}

impl Config {
    /// Creates an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidName`] unless `name` is a plain file name.
    pub fn new(name: impl Into<String>) -> Result<Self, TreeError> {
        let name = name.into();
        validate_config_name(&name)?;
        Ok(Self {
            name,
            sections: Vec::new(),
        })
    }

    /// Configuration name; also the file stem.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root sections in insertion order.
    #[must_use]
    pub fn sections(&self) -> &[ConfigSection] {
        &self.sections
    }

    /// Root section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&ConfigSection> {
        self.sections.iter().find(|section| section.name() == name)
    }

    /// Mutable root section by name.
    pub fn section_mut(&mut self, name: &str) -> Option<&mut ConfigSection> {
        self.sections.iter_mut().find(|section| section.name() == name)
    }

    /// Adds a root section, merging into an existing one of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::AlreadyAttached`] if `section` has a parent.
    pub fn add_section(&mut self, section: ConfigSection) -> Result<&mut ConfigSection, TreeError> {
        if let Some(parent) = section.parent_path() {
            return Err(TreeError::AlreadyAttached {
                name: section.name().to_string(),
                parent: parent.to_string(),
            });
        }
        let index = match self.sections.iter().position(|s| s.name() == section.name()) {
            Some(index) => {
                self.sections[index].merge(section);
                index
            }
            None => {
                self.sections.push(section);
                self.sections.len() - 1
            }
        };
        Ok(&mut self.sections[index])
    }

    /// Resolves a path of section names, creating missing sections unused.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::EmptyPath`] for an empty path and
    /// [`TreeError::InvalidName`] if a missing segment is not a valid name.
    pub fn section_recursive<S: AsRef<str>>(
        &mut self,
        path: &[S],
    ) -> Result<&mut ConfigSection, TreeError> {
        let Some((first, rest)) = path.split_first() else {
            return Err(TreeError::EmptyPath);
        };
        let name = first.as_ref();
        let index = match self.sections.iter().position(|s| s.name() == name) {
            Some(index) => index,
            None => {
                self.sections.push(ConfigSection::implicit(name)?);
                self.sections.len() - 1
            }
        };
        self.sections[index].section_recursive(rest)
    }

    /// Looks up a section by dotted path without creating anything.
    #[must_use]
    pub fn section_by_path(&self, path: &str) -> Option<&ConfigSection> {
        let mut segments = path.split('.');
        let mut current = self.section(segments.next()?)?;
        for segment in segments {
            current = current.section(segment)?;
        }
        Some(current)
    }

    /// Mutable variant of [`Self::section_by_path`].
    pub fn section_by_path_mut(&mut self, path: &str) -> Option<&mut ConfigSection> {
        let mut segments = path.split('.');
        let mut current = self.section_mut(segments.next()?)?;
        for segment in segments {
            current = current.section_mut(segment)?;
        }
        Some(current)
    }

    /// Entries with the given sync direction, keyed `section.path.key`.
    #[must_use]
    pub fn synced_entries(&self, kind: SyncKind) -> Vec<(String, &ConfigEntry)> {
        let mut out = Vec::new();
        for section in &self.sections {
            section.collect_synced(kind, &mut out);
        }
        out
    }

    /// Mutable variant of [`Self::synced_entries`].
    pub fn synced_entries_mut(&mut self, kind: SyncKind) -> Vec<(String, &mut ConfigEntry)> {
        let mut out = Vec::new();
        for section in &mut self.sections {
            section.collect_synced_mut(kind, &mut out);
        }
        out
    }

    /// Returns `true` if any used entry changed since its last snapshot.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.sections.iter().any(ConfigSection::has_changed)
    }

    /// Restores every entry to its default.
    pub fn reset_all(&mut self) {
        for section in &mut self.sections {
            section.reset_all();
        }
    }

    /// Snapshots every entry.
    pub fn snapshot_all(&mut self) {
        for section in &mut self.sections {
            section.snapshot_all();
        }
    }

    /// Renders the whole file. An empty tree renders as an empty string.
    #[must_use]
    pub fn serialize(&self, writer: &ConfigWriter) -> String {
        let blocks: Vec<String> = self
            .sections
            .iter()
            .filter_map(|section| section.serialize(writer))
            .collect();
        if blocks.is_empty() {
            return String::new();
        }
        let mut text = blocks.join("\n\n");
        text.push('\n');
        text
    }
}

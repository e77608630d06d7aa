//! Error types for the section tree.

use thiserror::Error;

/// Error type for tree construction and path resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A section or config name breaks a naming rule.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name
        name: String,
        /// Which rule it broke
        reason: &'static str,
    },

    /// The section is already attached to a parent.
    #[error("Section '{name}' already belongs to '{parent}'")]
    AlreadyAttached {
        /// Section name
        name: String,
        /// Path of the current parent
        parent: String,
    },

    /// A section path with no segments.
    #[error("Section path is empty")]
    EmptyPath,
}

/// Validates a section name.
pub(crate) fn validate_section_name(name: &str) -> Result<(), TreeError> {
    let reason = if name.is_empty() {
        Some("must not be empty")
    } else if name.trim() != name {
        Some("must not start or end with whitespace")
    } else if name.contains('.') {
        Some("must not contain '.'")
    } else if name.contains(['[', ']', '\n', '\r']) {
        Some("must not contain brackets or line breaks")
    } else {
        None
    };
    reason.map_or(Ok(()), |reason| {
        Err(TreeError::InvalidName {
            name: name.to_string(),
            reason,
        })
    })
}

/// Validates a config name, which becomes a file name.
pub(crate) fn validate_config_name(name: &str) -> Result<(), TreeError> {
    let reason = if name.trim().is_empty() {
        Some("must not be blank")
    } else if name.trim() != name {
        Some("must not start or end with whitespace")
    } else if name.contains(['/', '\\']) || name == "." || name == ".." {
        Some("must be a plain file name")
    } else {
        None
    };
    reason.map_or(Ok(()), |reason| {
        Err(TreeError::InvalidName {
            name: name.to_string(),
            reason,
        })
    })
}

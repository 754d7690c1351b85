//! Error taxonomy for session operations.
//!
//! Every variant is recovered at the MCP tool boundary and turned into an
//! error payload; none of them take the server down.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// A submission is missing a required field or carries an unusable value.
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Branch \"{0}\" already exists")]
    BranchExists(String),

    #[error("Branch \"{name}\" not found. {}", not_found_hint(.suggestions, .available))]
    BranchNotFound {
        name: String,
        /// Existing names sharing a case-insensitive substring with `name`.
        suggestions: Vec<String>,
        /// Every existing branch name, used when there are no suggestions.
        available: Vec<String>,
    },

    #[error("Branch \"{0}\" has already been merged")]
    BranchAlreadyMerged(String),

    #[error("Branch \"{0}\" has been merged and no longer accepts thoughts")]
    BranchFrozen(String),

    #[error("Handoff file not found: {0}")]
    HandoffNotFound(String),

    #[error("Malformed handoff: {0}")]
    MalformedHandoff(String),

    #[error("handoff I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidInput { field, reason }
    }
}

fn not_found_hint(suggestions: &[String], available: &[String]) -> String {
    if !suggestions.is_empty() {
        format!("Did you mean: {}?", suggestions.join(", "))
    } else if available.is_empty() {
        "No branches have been created".to_string()
    } else {
        format!("Available branches: {}", available.join(", "))
    }
}

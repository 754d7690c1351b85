//! Project knowledge snippets injected into submission responses.
//!
//! [`KnowledgeLookup`] is the seam: the tool handler asks it for a snippet for
//! each submitted thought. [`ProjectKnowledge`] is the config-backed
//! implementation, matching a handful of keyword groups.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps thought text to an optional snippet of background knowledge.
pub trait KnowledgeLookup: Send + Sync {
    fn lookup(&self, text: &str) -> Option<String>;
}

impl<F> KnowledgeLookup for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, text: &str) -> Option<String> {
        self(text)
    }
}

/// The `[knowledge]` table from the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectKnowledge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_endpoints: Option<Vec<String>>,
    /// Any other keys. Not used for lookup, but written into handoff documents.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

const DATABASE_WORDS: &[&str] = &["database", "postgres", "sql"];
const AUTH_WORDS: &[&str] = &["auth", "clerk", "login"];
const FRAMEWORK_WORDS: &[&str] = &["framework", "fastapi"];
const ENDPOINT_WORDS: &[&str] = &["endpoint", "api", "route"];

impl ProjectKnowledge {
    /// `true` when no entry of any kind is configured.
    pub fn is_empty(&self) -> bool {
        self.database.is_none()
            && self.auth.is_none()
            && self.framework.is_none()
            && self.key_endpoints.is_none()
            && self.extra.is_empty()
    }

    /// Number of configured top-level entries.
    pub fn entry_count(&self) -> usize {
        [
            self.database.is_some(),
            self.auth.is_some(),
            self.framework.is_some(),
            self.key_endpoints.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
            + self.extra.len()
    }

    /// JSON view used as the knowledge blob in handoff documents.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }
}

impl KnowledgeLookup for ProjectKnowledge {
    /// First matching keyword group wins, even if its entry is not configured.
    fn lookup(&self, text: &str) -> Option<String> {
        let lower = text.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if mentions(DATABASE_WORDS) {
            self.database.clone()
        } else if mentions(AUTH_WORDS) {
            self.auth.clone()
        } else if mentions(FRAMEWORK_WORDS) {
            self.framework.clone()
        } else if mentions(ENDPOINT_WORDS) {
            self.key_endpoints
                .as_ref()
                .map(|endpoints| format!("Key endpoints:\n{}", endpoints.join("\n")))
        } else {
            None
        }
    }
}

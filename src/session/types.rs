//! Core session type definitions.
//!
//! Defines [`ThoughtRecord`] (one thinking step), [`Branch`] (a named side track
//! forked from a cursor position), and [`SessionState`] (the aggregate every
//! tool call reads and mutates).
//!
//! Field names serialize in camelCase so the JSON embedded in handoff documents
//! stays readable by older sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::SessionError;

/// Name of the primary track. Always exists and can never be used as a branch name.
pub const MAIN_TRACK: &str = "main";

fn main_track() -> String {
    MAIN_TRACK.to_string()
}

/// A single thinking step stored on a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtRecord {
    /// Free-text content of the step.
    pub thought: String,
    /// Position on its track, starting at 1.
    pub thought_number: u32,
    /// Estimated total steps. Never lower than `thought_number` once stored.
    pub total_thoughts: u32,
    /// Whether the caller intends to continue after this step.
    pub next_thought_needed: bool,
    /// Track this record is stored on (`main` or a branch name).
    #[serde(default = "main_track")]
    pub track: String,
    /// Marks this step as reconsidering an earlier one. Changes the rendered header only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_revision: Option<bool>,
    /// Step number being reconsidered when `is_revision` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revises_thought: Option<u32>,
    /// Caller-supplied origin step. Stored and handed off; never used for routing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_from_thought: Option<u32>,
    /// Caller-supplied branch label. Routing uses `track`, not this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    /// Caller hint that the estimate in `total_thoughts` was too low.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs_more_thoughts: Option<bool>,
}

impl ThoughtRecord {
    /// A record with no revision or branch-origin metadata.
    pub fn plain(
        thought: impl Into<String>,
        thought_number: u32,
        total_thoughts: u32,
        next_thought_needed: bool,
        track: impl Into<String>,
    ) -> Self {
        Self {
            thought: thought.into(),
            thought_number,
            total_thoughts,
            next_thought_needed,
            track: track.into(),
            is_revision: None,
            revises_thought: None,
            branch_from_thought: None,
            branch_id: None,
            needs_more_thoughts: None,
        }
    }

    pub fn is_revision(&self) -> bool {
        self.is_revision.unwrap_or(false)
    }
}

/// A named side track forked from a position on another track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub name: String,
    /// Track the cursor was on when this branch was created.
    pub parent_track: String,
    /// Step number the cursor was at when this branch was created.
    pub parent_number: u32,
    #[serde(default)]
    pub thoughts: Vec<ThoughtRecord>,
    /// Creation time, millisecond precision.
    #[serde(with = "iso_millis")]
    pub created: DateTime<Utc>,
    /// Set once by a merge. A merged branch never accepts another record.
    #[serde(default)]
    pub merged: bool,
}

impl Branch {
    /// Append a record to this branch.
    ///
    /// Fails with [`SessionError::BranchFrozen`] once the branch has been merged.
    pub fn push(&mut self, record: ThoughtRecord) -> Result<(), SessionError> {
        if self.merged {
            return Err(SessionError::BranchFrozen(self.name.clone()));
        }
        self.thoughts.push(record);
        Ok(())
    }
}

/// The whole session: the main track, every branch ever created, and the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub main: Vec<ThoughtRecord>,
    /// Branches keyed by name, merged ones included.
    pub branches: BTreeMap<String, Branch>,
    /// Track of the most recently addressed position.
    pub current_track: String,
    /// Step number of the most recently addressed position (0 on a fresh branch).
    pub current_number: u32,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            main: Vec::new(),
            branches: BTreeMap::new(),
            current_track: main_track(),
            current_number: 0,
        }
    }
}

/// Serde adapter writing timestamps as `2026-10-16T12:00:00.000Z`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

//! Step submission: normalization, routing, and cursor updates.

use serde::Serialize;

use super::error::SessionError;
use super::observer::ThoughtObserver;
use super::types::{SessionState, ThoughtRecord, MAIN_TRACK};

/// What happened to a submitted record.
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    /// The record as stored (normalized total, final track).
    pub record: ThoughtRecord,
    /// Track the caller asked for, when the record had to fall back to main.
    pub fallback_from: Option<String>,
    pub active_branches: Vec<String>,
    /// Records across main and every branch.
    pub thought_history_length: usize,
}

/// Structured summary returned for a submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSummary {
    pub thought_number: u32,
    pub total_thoughts: u32,
    pub track: String,
    pub next_thought_needed: bool,
    pub active_branches: Vec<String>,
    pub thought_history_length: usize,
}

impl SubmitOutcome {
    pub fn summary(&self) -> SubmitSummary {
        SubmitSummary {
            thought_number: self.record.thought_number,
            total_thoughts: self.record.total_thoughts,
            track: self.record.track.clone(),
            next_thought_needed: self.record.next_thought_needed,
            active_branches: self.active_branches.clone(),
            thought_history_length: self.thought_history_length,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of branches that have not been merged, in name order.
    pub fn active_branches(&self) -> Vec<String> {
        self.branches
            .values()
            .filter(|b| !b.merged)
            .map(|b| b.name.clone())
            .collect()
    }

    /// Total stored records across main and every branch.
    pub fn thought_history_length(&self) -> usize {
        self.main.len() + self.branches.values().map(|b| b.thoughts.len()).sum::<usize>()
    }

    pub fn cursor(&self) -> (&str, u32) {
        (&self.current_track, self.current_number)
    }

    /// `true` if `track` is main or an existing branch.
    pub fn has_track(&self, track: &str) -> bool {
        track == MAIN_TRACK || self.branches.contains_key(track)
    }

    /// Store a validated record and move the cursor to it.
    ///
    /// Records addressed to an unknown or merged branch are stored on main
    /// instead; the outcome reports the requested track in `fallback_from`.
    pub fn submit(
        &mut self,
        mut record: ThoughtRecord,
        observer: &dyn ThoughtObserver,
    ) -> Result<SubmitOutcome, SessionError> {
        if record.thought_number > record.total_thoughts {
            record.total_thoughts = record.thought_number;
        }

        let mut fallback_from = None;
        if record.track == MAIN_TRACK {
            self.main.push(record.clone());
        } else {
            match self.branches.get_mut(&record.track) {
                Some(branch) if !branch.merged => branch.push(record.clone())?,
                existing => {
                    let merged = existing.is_some();
                    tracing::warn!(
                        track = %record.track,
                        merged,
                        "branch not open, storing thought in main track"
                    );
                    fallback_from = Some(std::mem::replace(&mut record.track, MAIN_TRACK.to_string()));
                    self.main.push(record.clone());
                }
            }
        }

        self.current_track = record.track.clone();
        self.current_number = record.thought_number;

        observer.on_thought(&record);

        tracing::debug!(
            track = %record.track,
            number = record.thought_number,
            total = record.total_thoughts,
            "thought stored"
        );

        Ok(SubmitOutcome {
            record,
            fallback_from,
            active_branches: self.active_branches(),
            thought_history_length: self.thought_history_length(),
        })
    }
}

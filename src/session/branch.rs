//! Branch creation and merging.
//!
//! Merge appends a marker record to main followed by a renumbered copy of every
//! branch thought. Main grows by exactly `1 + branch.thoughts.len()` and the
//! numbering stays contiguous.

use chrono::{SubsecRound, Utc};
use serde::Serialize;

use super::error::SessionError;
use super::types::{Branch, SessionState, ThoughtRecord, MAIN_TRACK};

/// Result of a successful merge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeReport {
    pub branch: String,
    pub thoughts_merged: usize,
    /// Length of main after the merge (also the new cursor position).
    pub main_length: usize,
}

impl SessionState {
    /// Fork a new branch from the current cursor and move the cursor onto it.
    ///
    /// Names are never reused, even after the original branch was merged.
    pub fn create_branch(&mut self, name: &str) -> Result<&Branch, SessionError> {
        if name.is_empty() {
            return Err(SessionError::invalid("branchName", "must be a non-empty string"));
        }
        if name == MAIN_TRACK || self.branches.contains_key(name) {
            return Err(SessionError::BranchExists(name.to_string()));
        }

        let branch = Branch {
            name: name.to_string(),
            parent_track: self.current_track.clone(),
            parent_number: self.current_number,
            thoughts: Vec::new(),
            created: Utc::now().trunc_subsecs(3),
            merged: false,
        };

        tracing::info!(
            branch = %name,
            parent = %branch.parent_track,
            parent_number = branch.parent_number,
            "branch created"
        );

        self.current_track = name.to_string();
        self.current_number = 0;
        Ok(self.branches.entry(name.to_string()).or_insert(branch))
    }

    /// Fold a branch back into main.
    pub fn merge_branch(&mut self, name: &str) -> Result<MergeReport, SessionError> {
        let Some(branch) = self.branches.get_mut(name) else {
            return Err(self.not_found(name));
        };
        if branch.merged {
            return Err(SessionError::BranchAlreadyMerged(name.to_string()));
        }

        let count = branch.thoughts.len();
        let base = step_count(self.main.len());
        self.main.push(ThoughtRecord::plain(
            format!(
                "=== MERGED BRANCH: {name} ===\nBranch created from [{}:{}]\nContained {count} thoughts",
                branch.parent_track, branch.parent_number
            ),
            base.saturating_add(1),
            base.saturating_add(step_count(count)).saturating_add(2),
            true,
            MAIN_TRACK,
        ));

        for thought in &branch.thoughts {
            let mut copy = thought.clone();
            copy.track = MAIN_TRACK.to_string();
            copy.thought_number = step_count(self.main.len()).saturating_add(1);
            copy.thought = format!("[from {name}] {}", thought.thought);
            self.main.push(copy);
        }

        branch.merged = true;
        self.current_track = MAIN_TRACK.to_string();
        self.current_number = step_count(self.main.len());

        tracing::info!(branch = %name, merged = count, main_length = self.main.len(), "branch merged");

        Ok(MergeReport {
            branch: name.to_string(),
            thoughts_merged: count,
            main_length: self.main.len(),
        })
    }

    fn not_found(&self, name: &str) -> SessionError {
        let wanted = name.to_lowercase();
        let suggestions = self
            .branches
            .keys()
            .filter(|existing| {
                let existing = existing.to_lowercase();
                existing.contains(&wanted) || wanted.contains(&existing)
            })
            .cloned()
            .collect();

        SessionError::BranchNotFound {
            name: name.to_string(),
            suggestions,
            available: self.branches.keys().cloned().collect(),
        }
    }
}

/// Track length as a step number, pinned at `u32::MAX`.
fn step_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

//! Caller-facing text for every tool.
//!
//! Each successful response ends with a directive telling the caller where to
//! continue, e.g.
//!
//! ```text
//! ---
//! Continue from: [main:2]
//! Active branches: probe
//! ---
//! ```

use crate::handoff::HandoffFile;
use crate::session::{Branch, MergeReport, SessionError, SessionState, SubmitOutcome};

/// The trailing `Continue from` block.
pub fn directive(track: &str, next_number: u32, active_branches: &[String]) -> String {
    let branches = if active_branches.is_empty() {
        "No active branches".to_string()
    } else {
        format!("Active branches: {}", active_branches.join(", "))
    };
    format!("\n---\nContinue from: [{track}:{next_number}]\n{branches}\n---")
}

/// Pretty JSON summary, optional knowledge section, then the directive.
pub fn submitted(outcome: &SubmitOutcome, knowledge: Option<&str>) -> String {
    let mut text = serde_json::to_string_pretty(&outcome.summary())
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"));

    if let Some(snippet) = knowledge {
        text.push_str("\n\nRelevant project knowledge:\n");
        text.push_str(snippet);
    }

    let record = &outcome.record;
    let next = if record.next_thought_needed {
        record.thought_number.saturating_add(1)
    } else {
        record.thought_number
    };
    text.push_str(&directive(&record.track, next, &outcome.active_branches));
    text
}

pub fn branch_created(branch: &Branch, active_branches: &[String]) -> String {
    format!(
        "Created branch \"{}\" from [{}:{}]{}",
        branch.name,
        branch.parent_track,
        branch.parent_number,
        directive(&branch.name, 1, active_branches)
    )
}

pub fn branch_merged(report: &MergeReport, state: &SessionState) -> String {
    let (track, number) = state.cursor();
    format!(
        "Successfully merged branch \"{}\" into main. Added {} thoughts.{}",
        report.branch,
        report.thoughts_merged,
        directive(track, number.saturating_add(1), &state.active_branches())
    )
}

pub fn handoff_written(file: &HandoffFile, state: &SessionState) -> String {
    format!(
        "Handoff generated: {}\nSaved to: {}\n\nThis file contains:\n- All {} main thoughts\n- {} branches\n- Project knowledge\n- Current state for resuming",
        file.filename,
        file.path.display(),
        state.main.len(),
        state.branches.len()
    )
}

pub fn resumed(filename: &str, state: &SessionState) -> String {
    let (track, number) = state.cursor();
    format!(
        "Successfully resumed from {filename}\n\nRestored:\n- {} main thoughts\n- {} branches\n- Current position: [{track}:{number}]{}",
        state.main.len(),
        state.branches.len(),
        directive(track, number.saturating_add(1), &state.active_branches())
    )
}

/// `{"error": ..., "status": "failed"}`, pretty printed.
pub fn failure(err: &SessionError) -> String {
    failure_message(&err.to_string())
}

pub fn failure_message(message: &str) -> String {
    let payload = serde_json::json!({
        "error": message,
        "status": "failed",
    });
    serde_json::to_string_pretty(&payload).unwrap_or_else(|_| message.to_string())
}

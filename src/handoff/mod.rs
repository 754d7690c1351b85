//! Handoff documents: a Markdown dump of the whole session that can be read
//! back to resume it.
//!
//! The human-readable sections are for inspection only. [`decode`] reads
//! nothing but the [`envelope`] at the end of the document.

pub mod envelope;

use chrono::{DateTime, SecondsFormat, Utc};
use std::path::{Path, PathBuf};

use crate::session::{SessionError, SessionState, MAIN_TRACK};

/// A handoff written to disk.
#[derive(Debug, Clone)]
pub struct HandoffFile {
    pub filename: String,
    pub path: PathBuf,
}

/// `handoff-2026-10-16T12-00-00-000Z.md` for the given instant.
pub fn handoff_filename(at: DateTime<Utc>) -> String {
    let stamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("handoff-{stamp}.md")
}

/// Render the full handoff document.
pub fn encode(
    state: &SessionState,
    knowledge: &serde_json::Value,
    generated_at: DateTime<Utc>,
) -> String {
    let mut doc = String::from("# Sequential Thinking Handoff\n\n");
    doc.push_str(&format!("Generated: {}\n\n", iso(generated_at)));

    let knowledge_json =
        serde_json::to_string_pretty(knowledge).unwrap_or_else(|_| "{}".to_string());
    doc.push_str("## Project Knowledge\n\n");
    doc.push_str(&format!("```json\n{knowledge_json}\n```\n\n"));

    let active = state.active_branches();
    let active = if active.is_empty() {
        "None".to_string()
    } else {
        active.join(", ")
    };
    doc.push_str("## Current State\n\n");
    doc.push_str(&format!("- Current Track: {}\n", state.current_track));
    doc.push_str(&format!("- Current Thought: {}\n", state.current_number));
    doc.push_str(&format!("- Active Branches: {active}\n\n"));

    doc.push_str(&format!("## Main Track ({} thoughts)\n\n", state.main.len()));
    for thought in &state.main {
        doc.push_str(&format!(
            "### [{MAIN_TRACK}:{}]\n\n{}\n\n",
            thought.thought_number, thought.thought
        ));
    }

    for (name, branch) in &state.branches {
        let status = if branch.merged { "MERGED" } else { "ACTIVE" };
        doc.push_str(&format!("## Branch: {name} ({status})\n\n"));
        doc.push_str(&format!(
            "- Parent: [{}:{}]\n",
            branch.parent_track, branch.parent_number
        ));
        doc.push_str(&format!("- Created: {}\n", iso(branch.created)));
        doc.push_str(&format!("- Thoughts: {}\n\n", branch.thoughts.len()));
        for thought in &branch.thoughts {
            doc.push_str(&format!(
                "### [{name}:{}]\n\n{}\n\n",
                thought.thought_number, thought.thought
            ));
        }
    }

    doc.push_str("## Resume Instructions\n\n");
    doc.push_str("To resume this session, use the `resume` command with this handoff file.\n\n");
    doc.push_str(&envelope::encode(state));
    doc
}

/// Restore a session from a handoff document's state envelope.
pub fn decode(document: &str) -> Result<SessionState, SessionError> {
    let body = envelope::locate(document)?;
    envelope::parse(&body)
}

/// Write a new handoff into `dir`, creating the directory if needed.
pub fn write_handoff(
    dir: &Path,
    state: &SessionState,
    knowledge: &serde_json::Value,
) -> Result<HandoffFile, SessionError> {
    let now = Utc::now();
    let filename = handoff_filename(now);
    let path = dir.join(&filename);

    std::fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;
    std::fs::write(&path, encode(state, knowledge, now)).map_err(|source| io_error(&path, source))?;

    tracing::info!(path = %path.display(), "handoff written");
    Ok(HandoffFile { filename, path })
}

/// Read and decode a handoff. Relative names resolve against `dir`.
pub fn read_handoff(dir: &Path, filename: &str) -> Result<SessionState, SessionError> {
    let path = dir.join(filename);
    if !path.is_file() {
        return Err(SessionError::HandoffNotFound(filename.to_string()));
    }

    let document = std::fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
    let state = decode(&document)?;

    tracing::info!(
        path = %path.display(),
        main = state.main.len(),
        branches = state.branches.len(),
        "handoff decoded"
    );
    Ok(state)
}

/// Handoff filenames in `dir`, newest first. A missing directory has none.
pub fn list_handoffs(dir: &Path) -> Result<Vec<String>, SessionError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|source| io_error(dir, source))?;
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with("handoff-") && name.ends_with(".md"))
        .collect();

    names.sort_unstable_by(|a, b| b.cmp(a));
    Ok(names)
}

fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn io_error(path: &Path, source: std::io::Error) -> SessionError {
    SessionError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SilentObserver, ThoughtRecord};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 14, 5, 9).unwrap()
    }

    #[test]
    fn filename_replaces_separators() {
        assert_eq!(
            handoff_filename(fixed_time()),
            "handoff-2026-10-16T14-05-09-000Z.md"
        );
    }

    #[test]
    fn document_sections_in_order() {
        let mut state = SessionState::new();
        state
            .submit(ThoughtRecord::plain("first idea", 1, 2, true, MAIN_TRACK), &SilentObserver)
            .unwrap();
        state.create_branch("probe").unwrap();
        state
            .submit(ThoughtRecord::plain("side idea", 1, 1, false, "probe"), &SilentObserver)
            .unwrap();

        let doc = encode(&state, &serde_json::json!({"database": "pg"}), fixed_time());

        let order = [
            "# Sequential Thinking Handoff",
            "Generated: 2026-10-16T14:05:09.000Z",
            "## Project Knowledge",
            "\"database\": \"pg\"",
            "## Current State",
            "- Current Track: probe",
            "- Current Thought: 1",
            "- Active Branches: probe",
            "## Main Track (1 thoughts)",
            "### [main:1]\n\nfirst idea",
            "## Branch: probe (ACTIVE)",
            "- Parent: [main:1]",
            "- Thoughts: 1",
            "### [probe:1]\n\nside idea",
            "## Resume Instructions",
            "### State Data\n\n```json\n{",
        ];
        let mut from = 0;
        for needle in order {
            let at = doc[from..]
                .find(needle)
                .unwrap_or_else(|| panic!("missing or out of order: {needle}"));
            from += at + needle.len();
        }
        assert!(doc.ends_with("}\n```\n"));
    }

    #[test]
    fn no_active_branches_reads_none() {
        let doc = encode(&SessionState::new(), &serde_json::json!({}), fixed_time());
        assert!(doc.contains("- Active Branches: None\n"));
        assert!(doc.contains("## Main Track (0 thoughts)"));
    }

    #[test]
    fn decode_restores_encoded_state() {
        let mut state = SessionState::new();
        state
            .submit(ThoughtRecord::plain("a", 1, 1, true, MAIN_TRACK), &SilentObserver)
            .unwrap();
        state.create_branch("b").unwrap();

        let doc = encode(&state, &serde_json::json!({}), fixed_time());
        assert_eq!(decode(&doc).unwrap(), state);
    }

    #[test]
    fn truncated_document_is_rejected() {
        let mut state = SessionState::new();
        state
            .submit(ThoughtRecord::plain("a", 1, 1, true, MAIN_TRACK), &SilentObserver)
            .unwrap();
        let doc = encode(&state, &serde_json::json!({}), fixed_time());
        let cut = &doc[..doc.len() - 10];
        assert!(matches!(decode(cut), Err(SessionError::MalformedHandoff(_))));
    }
}

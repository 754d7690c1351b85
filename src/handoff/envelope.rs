//! The machine-readable state block at the end of a handoff document.
//!
//! Layout:
//!
//! ````text
//! ### State Data
//!
//! ```json
//! { "main": [...], "branches": {...}, "currentTrack": "main", "currentNumber": 3, "formatVersion": 1 }
//! ```
//! ````
//!
//! Any number of blank lines may separate the heading from the opening fence.
//! The last `### State Data` heading in the document is the envelope; earlier
//! occurrences can only come from thought content. A block with no closing
//! fence is treated as a truncated write and rejected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::session::{Branch, SessionError, SessionState, ThoughtRecord, MAIN_TRACK};

pub const STATE_HEADING: &str = "### State Data";
pub const OPEN_FENCE: &str = "```json";
pub const CLOSE_FENCE: &str = "```";

/// Envelope version written by this build. Documents without a version are
/// from before versioning and read as version 1.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EncodedState<'a> {
    main: &'a [ThoughtRecord],
    branches: &'a BTreeMap<String, Branch>,
    current_track: &'a str,
    current_number: u32,
    format_version: u32,
}

/// Decoding view. Every top-level field may be absent or null.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawState {
    main: Option<Vec<ThoughtRecord>>,
    branches: Option<BTreeMap<String, Branch>>,
    current_track: Option<String>,
    current_number: Option<u32>,
    format_version: Option<u32>,
}

/// Serialize the full state as pretty JSON.
pub fn encode_state(state: &SessionState) -> String {
    let encoded = EncodedState {
        main: &state.main,
        branches: &state.branches,
        current_track: &state.current_track,
        current_number: state.current_number,
        format_version: FORMAT_VERSION,
    };
    serde_json::to_string_pretty(&encoded).unwrap_or_else(|_| "{}".to_string())
}

/// The full envelope: heading, blank line, fenced JSON.
pub fn encode(state: &SessionState) -> String {
    format!("{STATE_HEADING}\n\n{OPEN_FENCE}\n{}\n{CLOSE_FENCE}\n", encode_state(state))
}

/// Find the envelope in `document` and return the JSON between the fences.
pub fn locate(document: &str) -> Result<String, SessionError> {
    let lines: Vec<&str> = document.lines().collect();

    let heading = lines
        .iter()
        .rposition(|line| line.trim_end() == STATE_HEADING)
        .ok_or_else(|| malformed("could not find state data in handoff file"))?;

    let fence = lines[heading + 1..]
        .iter()
        .position(|line| !line.trim().is_empty())
        .map(|offset| heading + 1 + offset)
        .filter(|&idx| lines[idx].trim() == OPEN_FENCE)
        .ok_or_else(|| malformed("state data heading is not followed by a ```json block"))?;

    let body_start = fence + 1;
    let body_len = lines[body_start..]
        .iter()
        .position(|line| line.trim() == CLOSE_FENCE)
        .ok_or_else(|| malformed("state data block is not closed; the file may be truncated"))?;

    Ok(lines[body_start..body_start + body_len].join("\n"))
}

/// Parse envelope JSON into a [`SessionState`].
///
/// Missing top-level fields take their initial values. A cursor naming a
/// branch the document does not contain is moved to the end of main.
pub fn parse(body: &str) -> Result<SessionState, SessionError> {
    let raw: RawState = serde_json::from_str(body)
        .map_err(|e| SessionError::MalformedHandoff(format!("state data is not valid: {e}")))?;

    let version = raw.format_version.unwrap_or(1);
    if version > FORMAT_VERSION {
        return Err(SessionError::MalformedHandoff(format!(
            "state data format version {version} is newer than supported version {FORMAT_VERSION}"
        )));
    }

    let mut branches = raw.branches.unwrap_or_default();
    for (key, branch) in &mut branches {
        if branch.name != *key {
            branch.name = key.clone();
        }
    }

    let mut state = SessionState {
        main: raw.main.unwrap_or_default(),
        branches,
        current_track: raw
            .current_track
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| MAIN_TRACK.to_string()),
        current_number: raw.current_number.unwrap_or(0),
    };
    if !state.has_track(&state.current_track) {
        // Older writers moved the cursor to a requested branch before falling back to main.
        tracing::warn!(
            track = %state.current_track,
            "handoff cursor names an unknown branch, resuming at the end of main"
        );
        state.current_track = MAIN_TRACK.to_string();
        state.current_number = u32::try_from(state.main.len()).unwrap_or(u32::MAX);
    }

    Ok(state)
}

fn malformed(reason: &str) -> SessionError {
    SessionError::MalformedHandoff(reason.to_string())
}

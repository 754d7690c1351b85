#![allow(dead_code)]

use seqthink::session::{validate, SessionState, SilentObserver, SubmitOutcome, ThoughtInput};

/// Build a raw submission the way a client would send it.
pub fn input(thought: &str, number: u32, total: u32, next: bool, track: Option<&str>) -> ThoughtInput {
    let raw = ThoughtInput::new(thought, number, total, next);
    match track {
        Some(track) => raw.on_track(track),
        None => raw,
    }
}

/// Validate and submit a step against `state`, panicking on failure.
pub fn submit(
    state: &mut SessionState,
    thought: &str,
    number: u32,
    total: u32,
    next: bool,
    track: Option<&str>,
) -> SubmitOutcome {
    let record = validate(input(thought, number, total, next, track), &state.current_track).unwrap();
    state.submit(record, &SilentObserver).unwrap()
}

/// A session with two main thoughts, one merged branch, and one open branch.
pub fn populated_state() -> SessionState {
    let mut state = SessionState::new();
    submit(&mut state, "Outline the migration", 1, 4, true, None);
    submit(&mut state, "Check the database locks", 2, 4, true, None);

    state.create_branch("locks").unwrap();
    submit(&mut state, "Row locks on orders table", 1, 2, true, None);
    submit(&mut state, "Locks clear within 2s", 2, 2, false, None);
    state.merge_branch("locks").unwrap();

    submit(&mut state, "Proceed with online migration", 5, 6, true, None);
    state.create_branch("rollback").unwrap();
    submit(&mut state, "Keep old column for a week", 1, 3, true, None);
    state
}

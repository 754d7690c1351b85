mod helpers;

use helpers::submit;
use seqthink::session::{SessionError, SessionState, MAIN_TRACK};

#[test]
fn main_grows_by_marker_plus_branch_length() {
    for branch_len in 0..4u32 {
        let mut state = SessionState::new();
        submit(&mut state, "root", 1, 1, true, None);
        state.create_branch("b").unwrap();
        for n in 1..=branch_len {
            submit(&mut state, "branch step", n, branch_len, true, None);
        }

        let before = state.main.len();
        state.merge_branch("b").unwrap();
        assert_eq!(state.main.len(), before + 1 + branch_len as usize);
        assert!(state.branches["b"].merged);
        assert_eq!(state.cursor(), (MAIN_TRACK, state.main.len() as u32));
    }
}

#[test]
fn merged_copies_keep_metadata() {
    let mut state = SessionState::new();
    state.create_branch("rev").unwrap();
    let mut raw = helpers::input("reconsider", 1, 2, true, None);
    raw.is_revision = Some(true.into());
    raw.revises_thought = Some(1.into());
    let record = seqthink::session::validate(raw, &state.current_track).unwrap();
    state.submit(record, &seqthink::session::SilentObserver).unwrap();

    state.merge_branch("rev").unwrap();
    let copy = state.main.last().unwrap();
    assert_eq!(copy.thought, "[from rev] reconsider");
    assert_eq!(copy.is_revision, Some(true));
    assert_eq!(copy.revises_thought, Some(1));
    assert_eq!(copy.total_thoughts, 2);
    assert_eq!(copy.track, MAIN_TRACK);
}

#[test]
fn submissions_after_merge_fall_back() {
    let mut state = SessionState::new();
    state.create_branch("gone").unwrap();
    submit(&mut state, "one", 1, 1, false, None);
    state.merge_branch("gone").unwrap();

    let outcome = submit(&mut state, "late", 3, 3, false, Some("gone"));
    assert_eq!(outcome.record.track, MAIN_TRACK);
    assert_eq!(state.branches["gone"].thoughts.len(), 1);
}

#[test]
fn unknown_merge_suggests_similar_names() {
    let mut state = SessionState::new();
    state.create_branch("test-branch").unwrap();

    let err = state.merge_branch("test").unwrap_err();
    assert!(matches!(err, SessionError::BranchNotFound { .. }));
    assert!(err.to_string().contains("Did you mean: test-branch?"));

    let err = state.merge_branch("zzz").unwrap_err();
    assert!(err.to_string().contains("Available branches: test-branch"));
}

#[test]
fn double_merge_fails() {
    let mut state = SessionState::new();
    state.create_branch("once").unwrap();
    state.merge_branch("once").unwrap();
    let main_len = state.main.len();

    let err = state.merge_branch("once").unwrap_err();
    assert_eq!(err.to_string(), "Branch \"once\" has already been merged");
    assert_eq!(state.main.len(), main_len);
}

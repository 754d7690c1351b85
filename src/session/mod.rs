//! The in-memory thinking session.
//!
//! A [`SessionState`] holds the main track, every branch ever created, and a
//! cursor. Submissions go through [`validate`] and [`SessionState::submit`];
//! branches are managed by [`SessionState::create_branch`] and
//! [`SessionState::merge_branch`].

pub mod branch;
pub mod error;
pub mod observer;
pub mod state;
pub mod types;
pub mod validate;

pub use branch::MergeReport;
pub use error::SessionError;
pub use observer::{BoxRenderer, SilentObserver, ThoughtObserver};
pub use state::{SubmitOutcome, SubmitSummary};
pub use types::{Branch, SessionState, ThoughtRecord, MAIN_TRACK};
pub use validate::{validate, ThoughtInput};

//! Sequential thinking sessions with branching and handoff, served over MCP.
//!
//! seqthink is an [MCP](https://modelcontextprotocol.io/) server that records an
//! ordered sequence of thinking steps. A session can fork side investigations
//! into named branches, fold a branch back into the main track, and be written
//! to a Markdown handoff document that a later session resumes from.
//!
//! | Tool | Purpose |
//! |------|---------|
//! | `sequentialthinking` | Record a step on main or a branch |
//! | `sequentialthinking_branch` | Fork a branch from the current position |
//! | `sequentialthinking_merge` | Fold a branch back into main |
//! | `sequentialthinking_handoff` | Write the session to a handoff document |
//! | `sequentialthinking_resume` | Replace the session from a handoff document |
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`session`]: Session state, validation, branching, and merging
//! - [`handoff`]: Handoff document encoding, decoding, and file handling
//! - [`knowledge`]: Keyword-matched project knowledge snippets
//! - [`response`]: Caller-facing response text and the continuation directive

pub mod config;
pub mod handoff;
pub mod knowledge;
pub mod response;
pub mod session;

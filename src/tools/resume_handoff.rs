//! MCP `sequentialthinking_resume` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `sequentialthinking_resume` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ResumeHandoffParams {
    /// Handoff filename, relative to the configured handoff directory.
    #[schemars(
        description = "Filename of the handoff document (e.g. 'handoff-2026-10-16T12-00-00-000Z.md'). Absolute paths are also accepted."
    )]
    pub filename: String,
}

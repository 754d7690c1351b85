pub mod create_branch;
pub mod merge_branch;
pub mod resume_handoff;

use create_branch::CreateBranchParams;
use merge_branch::MergeBranchParams;
use resume_handoff::ResumeHandoffParams;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_handler, tool_router, ServerHandler};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use seqthink::config::SeqthinkConfig;
use seqthink::handoff;
use seqthink::knowledge::KnowledgeLookup;
use seqthink::response;
use seqthink::session::{self, SessionState, ThoughtInput, ThoughtObserver};

/// The seqthink MCP tool handler. Owns the one session of this process and
/// exposes the thinking tools via the `#[tool_router]` macro.
///
/// Every tool takes the session lock for its whole mutation, so a merge or a
/// resume is never observed half-applied.
#[derive(Clone)]
pub struct ThinkingTools {
    tool_router: ToolRouter<Self>,
    session: Arc<Mutex<SessionState>>,
    observer: Arc<dyn ThoughtObserver>,
    knowledge: Arc<dyn KnowledgeLookup>,
    knowledge_blob: Arc<serde_json::Value>,
    handoff_dir: PathBuf,
}

#[tool_router]
impl ThinkingTools {
    pub fn new(
        config: &SeqthinkConfig,
        observer: Arc<dyn ThoughtObserver>,
        knowledge: Arc<dyn KnowledgeLookup>,
    ) -> Self {
        Self {
            tool_router: Self::tool_router(),
            session: Arc::new(Mutex::new(SessionState::new())),
            observer,
            knowledge,
            knowledge_blob: Arc::new(config.knowledge.to_json()),
            handoff_dir: config.resolved_handoff_dir(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionState>, String> {
        self.session
            .lock()
            .map_err(|e| response::failure_message(&format!("session lock poisoned: {e}")))
    }

    /// Record one thinking step on the main track or a branch.
    #[tool(
        name = "sequentialthinking",
        description = "Enhanced sequential thinking tool with branching capabilities. Records a thinking step on the main track or on a branch created with sequentialthinking_branch, without losing your main train of thought."
    )]
    async fn sequential_thinking(
        &self,
        Parameters(input): Parameters<ThoughtInput>,
    ) -> Result<String, String> {
        let mut state = self.lock()?;

        let record = session::validate(input, &state.current_track)
            .map_err(|e| response::failure(&e))?;

        tracing::info!(
            track = %record.track,
            number = record.thought_number,
            content_len = record.thought.len(),
            "sequentialthinking called"
        );

        let outcome = state
            .submit(record, self.observer.as_ref())
            .map_err(|e| response::failure(&e))?;
        drop(state);

        let snippet = self.knowledge.lookup(&outcome.record.thought);
        Ok(response::submitted(&outcome, snippet.as_deref()))
    }

    /// Fork a branch from the current position.
    #[tool(
        name = "sequentialthinking_branch",
        description = "Create a new branch for investigating a side issue without losing your main train of thought"
    )]
    async fn create_branch(
        &self,
        Parameters(params): Parameters<CreateBranchParams>,
    ) -> Result<String, String> {
        tracing::info!(branch = %params.branch_name, "sequentialthinking_branch called");

        let mut state = self.lock()?;
        let branch = state
            .create_branch(&params.branch_name)
            .map_err(|e| response::failure(&e))?
            .clone();
        Ok(response::branch_created(&branch, &state.active_branches()))
    }

    /// Merge a branch back into main.
    #[tool(
        name = "sequentialthinking_merge",
        description = "Merge a branch back into the main thought sequence"
    )]
    async fn merge_branch(
        &self,
        Parameters(params): Parameters<MergeBranchParams>,
    ) -> Result<String, String> {
        tracing::info!(branch = %params.branch_name, "sequentialthinking_merge called");

        let mut state = self.lock()?;
        let report = state
            .merge_branch(&params.branch_name)
            .map_err(|e| response::failure(&e))?;
        Ok(response::branch_merged(&report, &state))
    }

    /// Write the whole session to a handoff document.
    #[tool(
        name = "sequentialthinking_handoff",
        description = "Generate a handoff document with all thoughts, branches, and project knowledge"
    )]
    async fn generate_handoff(&self) -> Result<String, String> {
        tracing::info!(dir = %self.handoff_dir.display(), "sequentialthinking_handoff called");

        let snapshot = self.lock()?.clone();
        let dir = self.handoff_dir.clone();
        let knowledge = Arc::clone(&self.knowledge_blob);

        let (file, snapshot) = tokio::task::spawn_blocking(move || {
            handoff::write_handoff(&dir, &snapshot, &knowledge).map(|file| (file, snapshot))
        })
        .await
        .map_err(|e| response::failure_message(&format!("handoff task failed: {e}")))?
        .map_err(|e| response::failure(&e))?;

        Ok(response::handoff_written(&file, &snapshot))
    }

    /// Replace the session with one read from a handoff document.
    #[tool(
        name = "sequentialthinking_resume",
        description = "Resume from a previously generated handoff document"
    )]
    async fn resume_handoff(
        &self,
        Parameters(params): Parameters<ResumeHandoffParams>,
    ) -> Result<String, String> {
        tracing::info!(filename = %params.filename, "sequentialthinking_resume called");

        let dir = self.handoff_dir.clone();
        let filename = params.filename.clone();
        let restored = tokio::task::spawn_blocking(move || handoff::read_handoff(&dir, &filename))
            .await
            .map_err(|e| response::failure_message(&format!("resume task failed: {e}")))?
            .map_err(|e| response::failure(&e))?;

        let mut state = self.lock()?;
        *state = restored;
        Ok(response::resumed(&params.filename, &state))
    }
}

#[tool_handler]
impl ServerHandler for ThinkingTools {
    fn get_info(&self) -> rmcp::model::ServerInfo {
        rmcp::model::ServerInfo {
            instructions: Some(
                "seqthink records sequential thoughts. Use sequentialthinking for each step, \
                 sequentialthinking_branch to investigate a side issue, sequentialthinking_merge \
                 to fold it back, and sequentialthinking_handoff / sequentialthinking_resume to \
                 carry a session across conversations."
                    .into(),
            ),
            capabilities: rmcp::model::ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

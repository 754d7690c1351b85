//! MCP server initialization for the stdio transport.
//!
//! Provides [`serve_stdio`], which builds the session observer and knowledge
//! lookup from config and wires them into a running [`ThinkingTools`] server.

use anyhow::Result;
use rmcp::ServiceExt;
use std::sync::Arc;

use crate::tools::ThinkingTools;
use seqthink::config::SeqthinkConfig;
use seqthink::knowledge::KnowledgeLookup;
use seqthink::session::{BoxRenderer, SilentObserver, ThoughtObserver};

/// Pick the thought observer: boxed stderr rendering unless disabled.
fn observer_for(config: &SeqthinkConfig) -> Arc<dyn ThoughtObserver> {
    if config.server.disable_thought_logging {
        Arc::new(SilentObserver)
    } else {
        Arc::new(BoxRenderer {
            wrap_width: config.server.wrap_width,
        })
    }
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: SeqthinkConfig) -> Result<()> {
    tracing::info!("starting seqthink MCP server on stdio");

    if config.knowledge.is_empty() {
        tracing::warn!("no [knowledge] entries configured, continuing without project knowledge");
    } else {
        tracing::info!(entries = config.knowledge.entry_count(), "project knowledge loaded");
    }

    let knowledge: Arc<dyn KnowledgeLookup> = Arc::new(config.knowledge.clone());
    let tools = ThinkingTools::new(&config, observer_for(&config), knowledge);
    tracing::info!(
        handoff_dir = %config.resolved_handoff_dir().display(),
        thought_logging = !config.server.disable_thought_logging,
        "session ready"
    );

    let transport = rmcp::transport::stdio();
    let server = tools.serve(transport).await?;
    tracing::info!("MCP server running, waiting for client");

    server.waiting().await?;
    tracing::info!("MCP server shut down");

    Ok(())
}

//! CLI `inspect` command: summarize a handoff document without resuming it.

use anyhow::{Context, Result};

use seqthink::config::SeqthinkConfig;
use seqthink::handoff;

/// Decode a handoff and print its cursor, tracks, and branch status.
pub fn inspect(config: &SeqthinkConfig, file: &str) -> Result<()> {
    let dir = config.resolved_handoff_dir();
    let state = handoff::read_handoff(&dir, file)
        .with_context(|| format!("failed to load handoff {file}"))?;

    let (track, number) = state.cursor();
    println!("Handoff: {file}");
    println!("{}", "=".repeat(40));
    println!("  Position:            [{track}:{number}]");
    println!("  Main thoughts:       {}", state.main.len());
    println!("  Total thoughts:      {}", state.thought_history_length());
    println!("  Branches:            {}", state.branches.len());
    println!();

    if !state.branches.is_empty() {
        println!("Branches:");
        for (name, branch) in &state.branches {
            println!(
                "  {:<20} {:<7} from [{}:{}]  {} thoughts  created {}",
                name,
                if branch.merged { "merged" } else { "active" },
                branch.parent_track,
                branch.parent_number,
                branch.thoughts.len(),
                branch.created.format("%Y-%m-%d %H:%M:%S UTC"),
            );
        }
        println!();
    }

    if let Some(last) = state.main.last() {
        println!("Last main thought [main:{}]:", last.thought_number);
        println!("  {}", last.thought.lines().next().unwrap_or_default());
    }

    Ok(())
}

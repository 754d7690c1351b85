use anyhow::Result;

use seqthink::config::SeqthinkConfig;
use seqthink::handoff;

/// List handoff documents in the configured directory, newest first.
pub fn handoffs(config: &SeqthinkConfig) -> Result<()> {
    let dir = config.resolved_handoff_dir();
    let names = handoff::list_handoffs(&dir)?;

    if names.is_empty() {
        println!("No handoffs in {}", dir.display());
        return Ok(());
    }

    println!("Handoffs in {}:", dir.display());
    for name in &names {
        println!("  {name}");
    }
    eprintln!("{} handoff(s).", names.len());

    Ok(())
}

//! CLI `doctor` command: pre-flight checks before wiring seqthink into an MCP client.

use anyhow::{bail, Result};
use std::path::Path;

use seqthink::config::SeqthinkConfig;
use seqthink::handoff;

const PROBE_FILE: &str = ".seqthink-doctor-probe";

/// Check configuration and the handoff directory, then print a client config snippet.
pub fn doctor(config: &SeqthinkConfig, config_path: &Path) -> Result<()> {
    let mut issues = 0usize;
    let handoff_dir = config.resolved_handoff_dir();

    println!("seqthink Health Report");
    println!("======================");
    println!();

    if config_path.exists() {
        println!("Config file:       {} (parsed)", config_path.display());
    } else {
        println!("Config file:       not found at {} (using defaults)", config_path.display());
    }
    println!("Log level:         {}", config.server.log_level);
    println!(
        "Thought logging:   {}",
        if config.server.disable_thought_logging { "disabled" } else { "enabled" }
    );
    println!();

    println!("Project knowledge:");
    if config.knowledge.is_empty() {
        println!("  (none configured; add a [knowledge] table to the config file)");
    } else {
        let k = &config.knowledge;
        println!("  Entries:         {}", k.entry_count());
        println!("  database:        {}", if k.database.is_some() { "set" } else { "-" });
        println!("  auth:            {}", if k.auth.is_some() { "set" } else { "-" });
        println!("  framework:       {}", if k.framework.is_some() { "set" } else { "-" });
        println!(
            "  key_endpoints:   {}",
            k.key_endpoints.as_ref().map_or(0, Vec::len)
        );
    }
    println!();

    println!("Handoff directory: {}", handoff_dir.display());
    match check_writable(&handoff_dir) {
        Ok(()) => println!("  Writable:        PASSED"),
        Err(e) => {
            println!("  Writable:        FAILED ({e})");
            println!("  Fix: set [handoff] dir or SEQTHINK_HANDOFF_DIR to a writable directory");
            issues += 1;
        }
    }
    match handoff::list_handoffs(&handoff_dir) {
        Ok(names) => {
            println!("  Handoffs:        {}", names.len());
            if let Some(latest) = names.first() {
                println!("  Latest:          {latest}");
            }
        }
        Err(e) => {
            println!("  Handoffs:        unreadable ({e})");
            issues += 1;
        }
    }
    println!();

    if issues > 0 {
        bail!("{issues} issue(s) found");
    }

    let exe = std::env::current_exe()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "seqthink".to_string());
    let snippet = serde_json::json!({
        "seqthink": {
            "command": exe,
            "args": ["serve"]
        }
    });
    println!("All checks passed. Add this to your MCP client config:");
    println!();
    println!("{}", serde_json::to_string_pretty(&snippet)?);

    Ok(())
}

/// Create the directory if needed and prove a file can be written into it.
fn check_writable(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let probe = dir.join(PROBE_FILE);
    std::fs::write(&probe, b"probe")?;
    std::fs::remove_file(&probe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writable_dir_passes_and_leaves_no_probe() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("handoffs");
        check_writable(&dir).unwrap();
        assert!(dir.is_dir());
        assert!(!dir.join(PROBE_FILE).exists());
    }

    #[test]
    fn doctor_passes_on_fresh_dir() {
        let tmp = TempDir::new().unwrap();
        let mut config = SeqthinkConfig::default();
        config.handoff.dir = tmp.path().to_string_lossy().into_owned();
        doctor(&config, &tmp.path().join("missing.toml")).unwrap();
    }
}

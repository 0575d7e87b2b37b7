use std::process::Command;

use anyhow::{Context, Result};

/// Workspace crates in dependency order.
const WORKSPACE_CRATES: &[&str] =
    &["salesdesk-domain", "salesdesk-core", "salesdesk-infra", "salesdesk-app"];

/// Check every crate on its own so missing dependency features are not
/// hidden by workspace feature unification.
pub fn check_each_crate() -> Result<()> {
    println!("Checking {} crates in isolation...", WORKSPACE_CRATES.len());

    for (index, name) in WORKSPACE_CRATES.iter().enumerate() {
        let total = WORKSPACE_CRATES.len();
        println!("\n[{}/{total}] cargo check -p {name} --all-targets", index + 1);

        let status = Command::new("cargo")
            .args(["check", "-p", name, "--all-targets"])
            .status()
            .with_context(|| format!("Failed to run cargo check for '{name}'"))?;

        if !status.success() {
            anyhow::bail!("Crate '{name}' failed to compile on its own");
        }

        println!("✅ {name} compiled successfully");
    }

    println!("\n✅ All {} crates compile in isolation!", WORKSPACE_CRATES.len());

    Ok(())
}

//! # Configuration Loading
//!
//! Resolves the `LedgerConfig` used by `init`: a YAML file given with
//! `--config`, with `--owner` overriding the file's owner when both are set.

use std::path::Path;

use anyhow::{bail, Context, Result};

use credledger_core::Principal;
use credledger_state::LedgerConfig;

/// Read a YAML ledger configuration.
pub fn load_config(path: &Path) -> Result<LedgerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: LedgerConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Combine an optional config file with an optional `--owner` override.
pub fn resolve_config(path: Option<&Path>, owner: Option<&str>) -> Result<LedgerConfig> {
    let owner = owner
        .map(Principal::new)
        .transpose()
        .context("invalid --owner")?;

    match (path, owner) {
        (Some(path), owner) => {
            let mut config = load_config(path)?;
            if let Some(owner) = owner {
                config.owner = owner;
            }
            Ok(config)
        }
        (None, Some(owner)) => Ok(LedgerConfig::new(owner)),
        (None, None) => bail!("an owner is required: pass --owner or --config"),
    }
}

//! # Snapshot Store
//!
//! The ledger is persisted as pretty-printed JSON. Writes go to a sibling
//! temporary file which is then renamed over the snapshot, so a crash never
//! leaves a truncated ledger behind.
//!
//! Mutating commands run their whole load → apply → save cycle inside
//! [`with_ledger_lock`], an exclusive advisory lock on a sibling `.lock`
//! file. Concurrent `credledger` processes therefore apply operations one
//! at a time, and two overlapping issuances never hand out the same id.
//! Readers take no lock: the rename makes every snapshot they see complete.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use credledger_state::CredentialLedger;

/// Default snapshot location, relative to the working directory.
pub const DEFAULT_STATE_PATH: &str = ".credledger/ledger.json";

/// Run `f` while holding the exclusive lock for the snapshot at `path`.
///
/// Blocks until any other holder releases it. The lock sits on
/// `<snapshot>.lock` rather than the snapshot itself, since each save
/// replaces the snapshot file.
pub fn with_ledger_lock<T>(path: &Path, f: impl FnOnce() -> Result<T>) -> Result<T> {
    ensure_parent(path)?;
    let lock_path = sibling(path, ".lock");
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("failed to open lock file {}", lock_path.display()))?;

    let mut lock = fd_lock::RwLock::new(file);
    let _guard = lock
        .write()
        .with_context(|| format!("failed to lock {}", lock_path.display()))?;
    tracing::debug!(lock = %lock_path.display(), "acquired ledger lock");
    f()
}

/// Load a snapshot and check its internal consistency.
pub fn load_ledger(path: &Path) -> Result<CredentialLedger> {
    if !path.exists() {
        bail!(
            "ledger not found at {} (run `credledger init` first)",
            path.display()
        );
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let ledger: CredentialLedger = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse ledger snapshot {}", path.display()))?;
    ledger
        .check_integrity()
        .with_context(|| format!("ledger snapshot {} failed integrity check", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        credentials = ledger.credential_count(),
        "loaded ledger snapshot"
    );
    Ok(ledger)
}

/// Atomically write a snapshot.
pub fn save_ledger(path: &Path, ledger: &CredentialLedger) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(ledger).context("failed to serialize ledger")?;
    let tmp = sibling(path, ".tmp");
    std::fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
    std::fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace {}", path.display()))?;

    tracing::debug!(path = %path.display(), "saved ledger snapshot");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    Ok(())
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "ledger.json".into());
    name.push(suffix);
    path.with_file_name(name)
}

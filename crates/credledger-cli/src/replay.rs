//! # Transaction Script Replay
//!
//! Applies a YAML list of transactions to the ledger in order, the way a
//! consensus host would apply a block. Each entry names its caller and may
//! pin a timestamp:
//!
//! ```yaml
//! - caller: contract-owner
//!   tx: { op: register_institution, institution: university1 }
//! - caller: university1
//!   timestamp: "2026-01-15T12:00:00Z"
//!   tx: { op: issue_credential, recipient: student1, credential_hash: hash123 }
//! ```
//!
//! Without `--keep-going` the first rejection aborts the replay and nothing
//! is saved. With it, rejected entries are reported and skipped, and the
//! effects of accepted entries are saved.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

use credledger_core::{Principal, Timestamp};
use credledger_state::{CredentialLedger, LedgerError, Receipt, Transaction, TxContext};

use crate::store::{load_ledger, save_ledger, with_ledger_lock};
use crate::EXIT_REJECTED;

/// Arguments for `credledger replay`.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// YAML transaction script.
    pub script: PathBuf,

    /// Skip rejected entries instead of aborting.
    #[arg(long)]
    pub keep_going: bool,
}

/// One entry of a transaction script.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptEntry {
    /// Identity the host attributes the transaction to.
    pub caller: Principal,
    /// Block time; the current time is used when absent.
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    /// The operation.
    pub tx: Transaction,
}

/// Outcome of one applied entry.
#[derive(Debug)]
pub struct EntryOutcome {
    /// Zero-based position in the script.
    pub index: usize,
    /// Operation name.
    pub op: &'static str,
    /// Receipt or rejection.
    pub result: Result<Receipt, LedgerError>,
}

/// Summary of a replay.
#[derive(Debug, Default)]
pub struct ReplayReport {
    /// Outcomes, in script order, of every entry that was attempted.
    pub outcomes: Vec<EntryOutcome>,
    /// Whether the replay stopped at a rejection.
    pub aborted: bool,
}

impl ReplayReport {
    /// Number of rejected entries.
    pub fn rejected(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// Number of accepted entries.
    pub fn accepted(&self) -> usize {
        self.outcomes.len() - self.rejected()
    }
}

/// Read a transaction script.
pub fn load_script(path: &Path) -> Result<Vec<ScriptEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse script {}", path.display()))
}

/// Apply entries to a ledger. Stops at the first rejection unless
/// `keep_going` is set.
pub fn apply_script(
    ledger: &mut CredentialLedger,
    entries: Vec<ScriptEntry>,
    keep_going: bool,
) -> ReplayReport {
    let mut report = ReplayReport::default();
    for (index, entry) in entries.into_iter().enumerate() {
        let ctx = TxContext::new(entry.caller, entry.timestamp.unwrap_or_else(Timestamp::now));
        let op = entry.tx.name();
        let result = ledger.apply(&ctx, entry.tx);
        let rejected = result.is_err();
        report.outcomes.push(EntryOutcome { index, op, result });
        if rejected && !keep_going {
            report.aborted = true;
            break;
        }
    }
    report
}

/// Execute `credledger replay`. The ledger lock is held for the whole run.
pub fn run_replay(args: &ReplayArgs, state: &Path) -> Result<u8> {
    let entries = load_script(&args.script)?;
    with_ledger_lock(state, || replay_locked(args, entries, state))
}

fn replay_locked(args: &ReplayArgs, entries: Vec<ScriptEntry>, state: &Path) -> Result<u8> {
    let mut ledger = load_ledger(state)?;
    tracing::info!(entries = entries.len(), script = %args.script.display(), "replaying script");

    let report = apply_script(&mut ledger, entries, args.keep_going);

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(receipt) => println!("[{}] {}: {receipt}", outcome.index, outcome.op),
            Err(e) => eprintln!("[{}] {}: ERR {}: {e}", outcome.index, outcome.op, e.code()),
        }
    }

    if report.aborted {
        eprintln!("replay aborted; ledger left unchanged");
        return Ok(EXIT_REJECTED);
    }

    save_ledger(state, &ledger)?;
    println!(
        "OK: {} applied, {} rejected",
        report.accepted(),
        report.rejected()
    );
    Ok(if report.rejected() > 0 { EXIT_REJECTED } else { 0 })
}

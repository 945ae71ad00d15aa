//! # credledger-cli — Credential Ledger Command-Line Host
//!
//! A minimal host for the ledger engine. It keeps the ledger as a JSON
//! snapshot on disk, supplies caller identity and time from the command
//! line, and serializes mutating commands across processes with an
//! exclusive lock on the snapshot (see [`store::with_ledger_lock`]).
//!
//! ## Subcommands
//!
//! - `init` — create an empty ledger with a configured owner
//! - `register`, `issue`, `revoke`, `disclose` — single mutating operations
//! - `verify`, `show`, `disclosure` — read-only queries
//! - `replay` — apply a YAML transaction script in order
//!
//! ## Exit Codes
//!
//! - `0` — success
//! - `1` — I/O, parse, or configuration failure
//! - `2` — the ledger rejected an operation (`ERR <code>: ...` is printed)
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from ledger logic; handlers delegate to
//!   `credledger-state`.

pub mod commands;
pub mod config;
pub mod replay;
pub mod store;

use credledger_state::LedgerError;

/// Exit code for an operation the ledger rejected.
pub const EXIT_REJECTED: u8 = 2;

/// Print a ledger rejection and return the matching exit code.
pub fn report_rejection(err: &LedgerError) -> u8 {
    tracing::debug!(code = err.code(), "operation rejected");
    eprintln!("ERR {}: {err}", err.code());
    EXIT_REJECTED
}

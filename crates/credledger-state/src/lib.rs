//! # credledger-state — Credential Ledger Engine
//!
//! The state machine behind academic-credential issuance and verification.
//! Institutions are registered by a fixed owner, issue hashed credentials to
//! recipients, and may revoke them; recipients may selectively disclose
//! supplementary fields; anyone may verify a credential against a hash.
//!
//! ## Modules
//!
//! - **Ledger** (`ledger.rs`): `CredentialLedger`, the engine. Owns the
//!   institution registry, the credential map, the disclosure store, and
//!   the identifier counter as explicit state.
//!
//! - **Credential** (`credential.rs`): the credential record and its
//!   `Active → Revoked` lifecycle.
//!
//! - **Disclosure** (`disclosure.rs`): `(credential, field) → value` store
//!   with last-writer-wins semantics and a per-credential field limit.
//!
//! - **Transaction** (`transaction.rs`): `Transaction`, `TxContext`, and
//!   `Receipt` for hosts that drive the ledger from an ordered log.
//!
//! - **Shared** (`shared.rs`): `SharedLedger`, serialized access for
//!   concurrent hosts.
//!
//! ## Crate Policy
//!
//! - No I/O, no clock reads inside operations; the host supplies caller
//!   identity and issuance time.
//! - A failed operation leaves the ledger exactly as it was.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod credential;
pub mod disclosure;
pub mod error;
pub mod ledger;
pub mod shared;
pub mod transaction;

pub use config::{LedgerConfig, DEFAULT_MAX_DISCLOSURES};
pub use credential::{Credential, CredentialStatus};
pub use disclosure::DisclosureStore;
pub use error::{
    LedgerError, ERR_DISCLOSURE_LIMIT, ERR_ID_EXHAUSTED, ERR_INVALID_INPUT, ERR_NOT_FOUND,
    ERR_UNAUTHORIZED,
};
pub use ledger::CredentialLedger;
pub use shared::SharedLedger;
pub use transaction::{Receipt, Transaction, TxContext};

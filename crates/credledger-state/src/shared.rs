//! # Shared Ledger Handle
//!
//! Thread-safe, cloneable handle for hosts that accept calls concurrently.
//!
//! Every mutating operation runs under a single write lock held for the
//! whole call, which totally orders counter increments and map writes:
//! concurrent issuers always receive distinct, gap-free identifiers, and a
//! failed call is never observed half-applied. Reads take the read lock and
//! return owned values so no guard escapes.
//!
//! The lock is `parking_lot`, not `tokio::sync`: no operation awaits, and a
//! panicking writer does not poison the ledger.

use std::sync::Arc;

use parking_lot::RwLock;

use credledger_core::{CredentialHash, CredentialId, DisclosureField, Principal, Timestamp};

use crate::credential::Credential;
use crate::error::LedgerError;
use crate::ledger::CredentialLedger;
use crate::transaction::{Receipt, Transaction, TxContext};

/// Cloneable, serialized access to one [`CredentialLedger`].
#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<CredentialLedger>>,
}

impl SharedLedger {
    /// Take ownership of a ledger.
    pub fn new(ledger: CredentialLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// See [`CredentialLedger::register_institution`].
    pub fn register_institution(
        &self,
        caller: &Principal,
        institution: Principal,
    ) -> Result<bool, LedgerError> {
        self.inner.write().register_institution(caller, institution)
    }

    /// See [`CredentialLedger::issue_credential`].
    pub fn issue_credential(
        &self,
        caller: &Principal,
        recipient: Principal,
        credential_hash: CredentialHash,
        issued_at: Timestamp,
    ) -> Result<CredentialId, LedgerError> {
        self.inner
            .write()
            .issue_credential(caller, recipient, credential_hash, issued_at)
    }

    /// See [`CredentialLedger::revoke_credential`].
    pub fn revoke_credential(
        &self,
        caller: &Principal,
        credential_id: CredentialId,
    ) -> Result<bool, LedgerError> {
        self.inner.write().revoke_credential(caller, credential_id)
    }

    /// See [`CredentialLedger::add_selective_disclosure`].
    pub fn add_selective_disclosure(
        &self,
        caller: &Principal,
        credential_id: CredentialId,
        field: DisclosureField,
        value: String,
    ) -> Result<bool, LedgerError> {
        self.inner
            .write()
            .add_selective_disclosure(caller, credential_id, field, value)
    }

    /// See [`CredentialLedger::apply`].
    pub fn apply(&self, ctx: &TxContext, tx: Transaction) -> Result<Receipt, LedgerError> {
        self.inner.write().apply(ctx, tx)
    }

    /// See [`CredentialLedger::verify_credential`].
    pub fn verify_credential(
        &self,
        credential_id: CredentialId,
        credential_hash: &CredentialHash,
    ) -> Result<bool, LedgerError> {
        self.inner
            .read()
            .verify_credential(credential_id, credential_hash)
    }

    /// See [`CredentialLedger::get_credential_info`].
    pub fn get_credential_info(&self, credential_id: CredentialId) -> Option<Credential> {
        self.inner.read().get_credential_info(credential_id).cloned()
    }

    /// See [`CredentialLedger::get_selective_disclosure`].
    pub fn get_selective_disclosure(
        &self,
        credential_id: CredentialId,
        field: &DisclosureField,
    ) -> Option<String> {
        self.inner
            .read()
            .get_selective_disclosure(credential_id, field)
            .map(str::to_owned)
    }

    /// Current value of the identifier counter.
    pub fn last_credential_id(&self) -> u64 {
        self.inner.read().last_credential_id()
    }

    /// A consistent copy of the whole ledger.
    pub fn snapshot(&self) -> CredentialLedger {
        self.inner.read().clone()
    }
}

impl From<CredentialLedger> for SharedLedger {
    fn from(ledger: CredentialLedger) -> Self {
        Self::new(ledger)
    }
}

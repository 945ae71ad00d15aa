//! # Credential Ledger Engine
//!
//! A deterministic state machine over three mappings (institutions,
//! credentials, selective disclosures) plus the identifier counter. Every
//! operation is a function of (current state, caller, arguments) and either
//! produces the next state or fails with a [`LedgerError`] leaving the state
//! untouched.
//!
//! ## Authorization
//!
//! | Operation | Who may call |
//! |---|---|
//! | `register_institution` | the configured owner |
//! | `issue_credential` | any registered institution |
//! | `revoke_credential` | the institution stored on the credential |
//! | `add_selective_disclosure` | the recipient stored on the credential |
//! | `verify_credential`, getters | anyone |
//!
//! ## Atomicity
//!
//! Each mutating method checks every precondition before its first write.
//! The identifier counter advances only after authorization succeeds, so
//! failed issuance never burns an identifier. For concurrent hosts, wrap
//! the ledger in [`crate::SharedLedger`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use credledger_core::{CredentialHash, CredentialId, DisclosureField, Principal, Timestamp};

use crate::config::LedgerConfig;
use crate::credential::Credential;
use crate::disclosure::DisclosureStore;
use crate::error::LedgerError;
use crate::transaction::{Receipt, Transaction, TxContext};

/// The complete ledger state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialLedger {
    config: LedgerConfig,
    institutions: BTreeMap<Principal, bool>,
    credentials: BTreeMap<CredentialId, Credential>,
    disclosures: DisclosureStore,
    last_credential_id: u64,
}

impl CredentialLedger {
    /// Create an empty ledger owned by `config.owner`.
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self {
            config,
            institutions: BTreeMap::new(),
            credentials: BTreeMap::new(),
            disclosures: DisclosureStore::new(),
            last_credential_id: 0,
        })
    }

    // ── Institution registry ─────────────────────────────────────────

    /// Register `institution` so it may issue credentials.
    ///
    /// Owner-only. Re-registering is a no-op that still succeeds; there is
    /// no deregistration.
    pub fn register_institution(
        &mut self,
        caller: &Principal,
        institution: Principal,
    ) -> Result<bool, LedgerError> {
        if *caller != self.config.owner {
            let err = LedgerError::Unauthorized {
                caller: caller.clone(),
            };
            tracing::warn!(
                caller = %caller,
                institution = %institution,
                code = err.code(),
                "institution registration rejected: caller is not the owner"
            );
            return Err(err);
        }

        let previous = self.institutions.insert(institution.clone(), true);
        tracing::info!(
            institution = %institution,
            newly_registered = previous.is_none(),
            "institution registered"
        );
        Ok(true)
    }

    /// Whether `principal` is a registered institution.
    pub fn is_institution(&self, principal: &Principal) -> bool {
        self.institutions.get(principal).copied().unwrap_or(false)
    }

    /// Registered institutions, in identity order.
    pub fn institutions(&self) -> impl Iterator<Item = &Principal> {
        self.institutions
            .iter()
            .filter(|(_, registered)| **registered)
            .map(|(principal, _)| principal)
    }

    // ── Issuance ─────────────────────────────────────────────────────

    /// Issue a credential from `caller` to `recipient`.
    ///
    /// The caller must be a registered institution. On success the next
    /// identifier is allocated and returned; on failure the counter is
    /// unchanged.
    pub fn issue_credential(
        &mut self,
        caller: &Principal,
        recipient: Principal,
        credential_hash: CredentialHash,
        issued_at: Timestamp,
    ) -> Result<CredentialId, LedgerError> {
        if !self.is_institution(caller) {
            let err = LedgerError::NotAuthorizedInstitution {
                caller: caller.clone(),
            };
            tracing::warn!(
                caller = %caller,
                code = err.code(),
                "credential issuance rejected: caller is not a registered institution"
            );
            return Err(err);
        }

        let id = self.next_credential_id().map_err(|err| {
            tracing::warn!(
                caller = %caller,
                code = err.code(),
                "credential issuance rejected: identifier space exhausted"
            );
            err
        })?;
        let credential = Credential::issue(
            id,
            caller.clone(),
            recipient,
            credential_hash,
            issued_at,
        );
        self.credentials.insert(id, credential);
        self.last_credential_id = id.get();

        tracing::info!(
            credential_id = %id,
            institution = %caller,
            issued_at = %issued_at,
            "credential issued"
        );
        Ok(id)
    }

    fn next_credential_id(&self) -> Result<CredentialId, LedgerError> {
        let next = self
            .last_credential_id
            .checked_add(1)
            .ok_or(LedgerError::IdentifierSpaceExhausted)?;
        Ok(CredentialId::new(next)?)
    }

    // ── Revocation ───────────────────────────────────────────────────

    /// Revoke a credential. Only its issuing institution may do so.
    ///
    /// Revoking an already-revoked credential succeeds and changes nothing.
    pub fn revoke_credential(
        &mut self,
        caller: &Principal,
        credential_id: CredentialId,
    ) -> Result<bool, LedgerError> {
        let credential = self
            .credentials
            .get_mut(&credential_id)
            .ok_or_else(|| not_found("revocation", credential_id))?;

        if credential.institution() != caller {
            let err = LedgerError::NotAuthorizedInstitution {
                caller: caller.clone(),
            };
            tracing::warn!(
                caller = %caller,
                credential_id = %credential_id,
                code = err.code(),
                "revocation rejected: caller did not issue this credential"
            );
            return Err(err);
        }

        let already_revoked = credential.is_revoked();
        credential.mark_revoked();
        tracing::info!(
            credential_id = %credential_id,
            already_revoked,
            "credential revoked"
        );
        Ok(true)
    }

    // ── Selective disclosure ─────────────────────────────────────────

    /// Disclose `field = value` on a credential. Only its recipient may do
    /// so. Writing an existing field replaces the previous value.
    pub fn add_selective_disclosure(
        &mut self,
        caller: &Principal,
        credential_id: CredentialId,
        field: DisclosureField,
        value: String,
    ) -> Result<bool, LedgerError> {
        let credential = self
            .credentials
            .get(&credential_id)
            .ok_or_else(|| not_found("disclosure", credential_id))?;

        if credential.recipient() != caller {
            let err = LedgerError::NotAuthorizedRecipient {
                caller: caller.clone(),
                credential_id,
            };
            tracing::warn!(
                caller = %caller,
                credential_id = %credential_id,
                field = %field,
                code = err.code(),
                "disclosure rejected: caller is not the recipient"
            );
            return Err(err);
        }

        self.disclosures
            .check_capacity(
                credential_id,
                &field,
                self.config.max_disclosures_per_credential,
            )
            .map_err(|err| {
                tracing::warn!(
                    credential_id = %credential_id,
                    field = %field,
                    code = err.code(),
                    "disclosure rejected: field limit reached"
                );
                err
            })?;

        tracing::info!(credential_id = %credential_id, field = %field, "field disclosed");
        self.disclosures.put(credential_id, field, value);
        Ok(true)
    }

    // ── Verification & queries ───────────────────────────────────────

    /// Publicly verify a credential against a presented hash.
    ///
    /// `Ok(true)` iff the hash matches and the credential is not revoked.
    /// A mismatch or a revoked credential is `Ok(false)`; only an unknown
    /// identifier is an error.
    pub fn verify_credential(
        &self,
        credential_id: CredentialId,
        credential_hash: &CredentialHash,
    ) -> Result<bool, LedgerError> {
        let credential = self
            .credentials
            .get(&credential_id)
            .ok_or_else(|| not_found("verification", credential_id))?;
        let valid = credential.matches(credential_hash);
        tracing::debug!(credential_id = %credential_id, valid, "credential verified");
        Ok(valid)
    }

    /// The stored credential record, if issued.
    pub fn get_credential_info(&self, credential_id: CredentialId) -> Option<&Credential> {
        self.credentials.get(&credential_id)
    }

    /// One disclosed value, if present.
    pub fn get_selective_disclosure(
        &self,
        credential_id: CredentialId,
        field: &DisclosureField,
    ) -> Option<&str> {
        self.disclosures.get(credential_id, field)
    }

    /// All disclosed fields of a credential, ordered by field name.
    pub fn disclosures(&self, credential_id: CredentialId) -> Vec<(&DisclosureField, &str)> {
        self.disclosures.fields(credential_id)
    }

    /// All credentials, in identifier order.
    pub fn credentials(&self) -> impl Iterator<Item = &Credential> {
        self.credentials.values()
    }

    /// Number of issued credentials (revoked ones included).
    pub fn credential_count(&self) -> usize {
        self.credentials.len()
    }

    /// Current value of the identifier counter (0 before any issuance).
    pub fn last_credential_id(&self) -> u64 {
        self.last_credential_id
    }

    /// The configured owner.
    pub fn owner(&self) -> &Principal {
        &self.config.owner
    }

    /// The ledger configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ── Transaction dispatch ─────────────────────────────────────────

    /// Apply a host-ordered transaction.
    pub fn apply(&mut self, ctx: &TxContext, tx: Transaction) -> Result<Receipt, LedgerError> {
        tracing::debug!(op = tx.name(), caller = %ctx.caller, "applying transaction");
        match tx {
            Transaction::RegisterInstitution { institution } => self
                .register_institution(&ctx.caller, institution)
                .map(Receipt::Registered),
            Transaction::IssueCredential {
                recipient,
                credential_hash,
            } => self
                .issue_credential(&ctx.caller, recipient, credential_hash, ctx.timestamp)
                .map(Receipt::Issued),
            Transaction::RevokeCredential { credential_id } => self
                .revoke_credential(&ctx.caller, credential_id)
                .map(Receipt::Revoked),
            Transaction::AddSelectiveDisclosure {
                credential_id,
                field,
                value,
            } => self
                .add_selective_disclosure(&ctx.caller, credential_id, field, value)
                .map(Receipt::Disclosed),
        }
    }

    // ── Snapshot integrity ───────────────────────────────────────────

    /// Check invariants a deserialized snapshot must satisfy: identifiers
    /// keyed consistently and never above the counter, and disclosures only
    /// for issued credentials.
    pub fn check_integrity(&self) -> Result<(), LedgerError> {
        self.config.validate()?;

        for (key, credential) in &self.credentials {
            if *key != credential.id() {
                return Err(LedgerError::CorruptSnapshot(format!(
                    "credential stored under {key} claims id {}",
                    credential.id()
                )));
            }
            if key.get() > self.last_credential_id {
                return Err(LedgerError::CorruptSnapshot(format!(
                    "credential {key} is above the identifier counter {}",
                    self.last_credential_id
                )));
            }
        }

        for id in self.disclosures.credential_ids() {
            if !self.credentials.contains_key(&id) {
                return Err(LedgerError::CorruptSnapshot(format!(
                    "disclosures recorded for unknown credential {id}"
                )));
            }
        }
        Ok(())
    }
}

fn not_found(operation: &'static str, credential_id: CredentialId) -> LedgerError {
    let err = LedgerError::NotFound { credential_id };
    tracing::warn!(
        operation,
        credential_id = %credential_id,
        code = err.code(),
        "{operation} rejected: credential not found"
    );
    err
}

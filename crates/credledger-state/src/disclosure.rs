//! # Selective Disclosure Store
//!
//! Maps `(credential, field) → value`. Fields of one credential are
//! independent; writing a field again replaces the previous value with no
//! history kept. Values are opaque strings and are never validated.
//!
//! Authorization (recipient-only writes) is enforced by the ledger before it
//! reaches this store; the store itself only enforces the per-credential
//! field limit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use credledger_core::{CredentialId, DisclosureField};

use crate::error::LedgerError;

/// Disclosed values, grouped by credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureStore {
    entries: BTreeMap<CredentialId, BTreeMap<DisclosureField, String>>,
}

impl DisclosureStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up one disclosed value.
    pub fn get(&self, credential_id: CredentialId, field: &DisclosureField) -> Option<&str> {
        self.entries
            .get(&credential_id)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    /// All disclosed fields of a credential, ordered by field name.
    pub fn fields(&self, credential_id: CredentialId) -> Vec<(&DisclosureField, &str)> {
        self.entries
            .get(&credential_id)
            .map(|fields| fields.iter().map(|(k, v)| (k, v.as_str())).collect())
            .unwrap_or_default()
    }

    /// Credentials that have at least one disclosed field.
    pub fn credential_ids(&self) -> impl Iterator<Item = CredentialId> + '_ {
        self.entries.keys().copied()
    }

    /// Number of distinct fields disclosed for a credential.
    pub fn field_count(&self, credential_id: CredentialId) -> usize {
        self.entries.get(&credential_id).map_or(0, BTreeMap::len)
    }

    /// Fail if writing `field` would add a new field beyond `limit`.
    /// Overwrites of an existing field always pass.
    pub fn check_capacity(
        &self,
        credential_id: CredentialId,
        field: &DisclosureField,
        limit: usize,
    ) -> Result<(), LedgerError> {
        let overwrite = self
            .entries
            .get(&credential_id)
            .is_some_and(|fields| fields.contains_key(field));
        if overwrite || self.field_count(credential_id) < limit {
            Ok(())
        } else {
            Err(LedgerError::DisclosureLimitExceeded { credential_id, limit })
        }
    }

    /// Store or overwrite a value. Returns the previous value, if any.
    pub fn put(
        &mut self,
        credential_id: CredentialId,
        field: DisclosureField,
        value: String,
    ) -> Option<String> {
        self.entries
            .entry(credential_id)
            .or_default()
            .insert(field, value)
    }
}

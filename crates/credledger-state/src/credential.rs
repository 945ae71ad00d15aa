//! # Credential Lifecycle
//!
//! A credential has exactly two states:
//!
//! ```text
//! Active ──▶ Revoked (terminal)
//! ```
//!
//! Issuance creates the credential in `Active`. Only the issuing institution
//! can move it to `Revoked`, and nothing moves it back. Every field other
//! than the revocation flag is fixed at issuance; the fields are private and
//! there are no setters.

use serde::{Deserialize, Serialize};

use credledger_core::{CredentialHash, CredentialId, Principal, Timestamp};

// ─── Credential Status ───────────────────────────────────────────────

/// Lifecycle state of a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialStatus {
    /// Issued and not revoked.
    Active,
    /// Revoked by its issuer (terminal).
    Revoked,
}

impl CredentialStatus {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Revoked)
    }

    /// Whether a credential in this state can verify successfully.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// States reachable in one transition.
    pub fn valid_transitions(&self) -> &'static [CredentialStatus] {
        match self {
            Self::Active => &[Self::Revoked],
            Self::Revoked => &[],
        }
    }
}

impl std::fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Revoked => "REVOKED",
        };
        f.write_str(s)
    }
}

// ─── Credential ──────────────────────────────────────────────────────

/// An issued credential record, owned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    id: CredentialId,
    institution: Principal,
    recipient: Principal,
    credential_hash: CredentialHash,
    issuance_date: Timestamp,
    is_revoked: bool,
}

impl Credential {
    pub(crate) fn issue(
        id: CredentialId,
        institution: Principal,
        recipient: Principal,
        credential_hash: CredentialHash,
        issuance_date: Timestamp,
    ) -> Self {
        Self {
            id,
            institution,
            recipient,
            credential_hash,
            issuance_date,
            is_revoked: false,
        }
    }

    /// Ledger-assigned identifier.
    pub fn id(&self) -> CredentialId {
        self.id
    }

    /// The institution that issued the credential.
    pub fn institution(&self) -> &Principal {
        &self.institution
    }

    /// The principal the credential was issued to.
    pub fn recipient(&self) -> &Principal {
        &self.recipient
    }

    /// Reference to the off-chain credential content.
    pub fn credential_hash(&self) -> &CredentialHash {
        &self.credential_hash
    }

    /// When the credential was issued.
    pub fn issuance_date(&self) -> Timestamp {
        self.issuance_date
    }

    /// Whether the credential has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.is_revoked
    }

    /// Current lifecycle state.
    pub fn status(&self) -> CredentialStatus {
        if self.is_revoked {
            CredentialStatus::Revoked
        } else {
            CredentialStatus::Active
        }
    }

    /// True iff `hash` equals the stored hash and the credential is active.
    pub fn matches(&self, hash: &CredentialHash) -> bool {
        !self.is_revoked && self.credential_hash == *hash
    }

    /// Flip to `Revoked`. Idempotent; there is no inverse.
    pub(crate) fn mark_revoked(&mut self) {
        self.is_revoked = true;
    }
}

//! # Transaction Envelope
//!
//! Hosts that order ledger operations through a log (a consensus layer, a
//! replay script) describe each call as a [`Transaction`] and supply the
//! caller identity and block time in a [`TxContext`]. Applying a transaction
//! yields a [`Receipt`] carrying the same value the direct method returns.

use serde::{Deserialize, Serialize};

use credledger_core::{CredentialHash, CredentialId, DisclosureField, Principal, Timestamp};

/// Caller identity and time, supplied by the host for one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxContext {
    /// The authenticated caller.
    pub caller: Principal,
    /// Time at which the host orders the transaction.
    pub timestamp: Timestamp,
}

impl TxContext {
    /// Context with an explicit timestamp.
    pub fn new(caller: Principal, timestamp: Timestamp) -> Self {
        Self { caller, timestamp }
    }

    /// Context stamped with the current UTC time.
    pub fn now(caller: Principal) -> Self {
        Self::new(caller, Timestamp::now())
    }
}

/// A mutating ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Transaction {
    /// Owner-only: mark an identity as a registered institution.
    RegisterInstitution {
        /// Identity to register.
        institution: Principal,
    },
    /// Institution-only: issue a credential to `recipient`.
    IssueCredential {
        /// Who the credential is for.
        recipient: Principal,
        /// Reference to the off-chain content.
        credential_hash: CredentialHash,
    },
    /// Issuer-only: revoke a credential.
    RevokeCredential {
        /// Credential to revoke.
        credential_id: CredentialId,
    },
    /// Recipient-only: disclose one field of a credential.
    AddSelectiveDisclosure {
        /// Credential being annotated.
        credential_id: CredentialId,
        /// Field name.
        field: DisclosureField,
        /// Disclosed value.
        #[serde(deserialize_with = "credledger_core::scalar::deserialize")]
        value: String,
    },
}

impl Transaction {
    /// Operation name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegisterInstitution { .. } => "register_institution",
            Self::IssueCredential { .. } => "issue_credential",
            Self::RevokeCredential { .. } => "revoke_credential",
            Self::AddSelectiveDisclosure { .. } => "add_selective_disclosure",
        }
    }
}

/// Successful outcome of an applied transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "value", rename_all = "snake_case")]
pub enum Receipt {
    /// Institution registration result.
    Registered(bool),
    /// Identifier of the newly issued credential.
    Issued(CredentialId),
    /// Revocation result.
    Revoked(bool),
    /// Disclosure result.
    Disclosed(bool),
}

impl std::fmt::Display for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registered(ok) => write!(f, "registered: {ok}"),
            Self::Issued(id) => write!(f, "issued credential {id}"),
            Self::Revoked(ok) => write!(f, "revoked: {ok}"),
            Self::Disclosed(ok) => write!(f, "disclosed: {ok}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_yaml_shape() {
        let yaml = "op: add_selective_disclosure\ncredential_id: 1\nfield: gpa\nvalue: \"3.8\"\n";
        let tx: Transaction = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            tx,
            Transaction::AddSelectiveDisclosure {
                credential_id: CredentialId::FIRST,
                field: DisclosureField::new("gpa"),
                value: "3.8".to_string(),
            }
        );
        assert_eq!(tx.name(), "add_selective_disclosure");
    }

    #[test]
    fn test_transaction_unquoted_scalars() {
        let yaml = "op: add_selective_disclosure\ncredential_id: 1\nfield: 2024\nvalue: 3.8\n";
        let tx: Transaction = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            tx,
            Transaction::AddSelectiveDisclosure {
                credential_id: CredentialId::FIRST,
                field: DisclosureField::new("2024"),
                value: "3.8".to_string(),
            }
        );

        let yaml = "op: issue_credential\nrecipient: student1\ncredential_hash: 12345\n";
        let tx: Transaction = serde_yaml::from_str(yaml).unwrap();
        let Transaction::IssueCredential { credential_hash, .. } = tx else {
            panic!("expected issue_credential");
        };
        assert_eq!(credential_hash.as_str(), "12345");
    }

    #[test]
    fn test_transaction_rejects_zero_id() {
        let yaml = "op: revoke_credential\ncredential_id: 0\n";
        assert!(serde_yaml::from_str::<Transaction>(yaml).is_err());
    }

    #[test]
    fn test_receipt_json_shape() {
        let json = serde_json::to_value(Receipt::Issued(CredentialId::FIRST)).unwrap();
        assert_eq!(json, serde_json::json!({"result": "issued", "value": 1}));
        assert_eq!(Receipt::Revoked(true).to_string(), "revoked: true");
    }
}

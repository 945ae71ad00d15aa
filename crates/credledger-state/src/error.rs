//! # Ledger Errors
//!
//! Every ledger operation returns `Result<_, LedgerError>`. A failed call
//! never leaves partial writes behind: all preconditions are checked before
//! the first mutation.
//!
//! ## Error Codes
//!
//! Existing callers match on numeric codes, so each variant maps to one:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 101  | referenced credential does not exist |
//! | 103  | caller lacks the required authorization |
//! | 104  | credential already has the maximum number of disclosed fields |
//! | 105  | identifier counter cannot advance |
//! | 100  | invalid configuration, corrupt snapshot, or malformed input |

use thiserror::Error;

use credledger_core::{CoreError, CredentialId, Principal};

/// Malformed configuration or input.
pub const ERR_INVALID_INPUT: u32 = 100;
/// Referenced credential does not exist.
pub const ERR_NOT_FOUND: u32 = 101;
/// Caller lacks the required authorization.
pub const ERR_UNAUTHORIZED: u32 = 103;
/// Per-credential disclosure limit reached.
pub const ERR_DISCLOSURE_LIMIT: u32 = 104;
/// Identifier counter exhausted.
pub const ERR_ID_EXHAUSTED: u32 = 105;

/// Errors returned by ledger operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// An owner-only operation was attempted by someone else.
    #[error("caller {caller} is not the contract owner")]
    Unauthorized {
        /// The rejected caller.
        caller: Principal,
    },

    /// Issuance by an unregistered institution, or revocation by an
    /// institution other than the issuer.
    #[error("caller {caller} is not an authorized institution for this operation")]
    NotAuthorizedInstitution {
        /// The rejected caller.
        caller: Principal,
    },

    /// Disclosure attempted by someone other than the credential's recipient.
    #[error("caller {caller} is not the recipient of credential {credential_id}")]
    NotAuthorizedRecipient {
        /// The rejected caller.
        caller: Principal,
        /// The credential the caller tried to annotate.
        credential_id: CredentialId,
    },

    /// No credential with this identifier has been issued.
    #[error("credential {credential_id} not found")]
    NotFound {
        /// The unknown identifier.
        credential_id: CredentialId,
    },

    /// Adding a new field would exceed the per-credential limit.
    #[error("credential {credential_id} already discloses the maximum of {limit} fields")]
    DisclosureLimitExceeded {
        /// The credential being annotated.
        credential_id: CredentialId,
        /// The configured limit.
        limit: usize,
    },

    /// The identifier counter is at `u64::MAX`.
    #[error("credential identifier space exhausted")]
    IdentifierSpaceExhausted,

    /// Ledger configuration is unusable.
    #[error("invalid ledger configuration: {0}")]
    InvalidConfig(String),

    /// A persisted ledger snapshot is internally inconsistent.
    #[error("corrupt ledger snapshot: {0}")]
    CorruptSnapshot(String),

    /// A core primitive could not be constructed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl LedgerError {
    /// Numeric error code, compatible with the reference numbering.
    pub fn code(&self) -> u32 {
        match self {
            Self::NotFound { .. } => ERR_NOT_FOUND,
            Self::Unauthorized { .. }
            | Self::NotAuthorizedInstitution { .. }
            | Self::NotAuthorizedRecipient { .. } => ERR_UNAUTHORIZED,
            Self::DisclosureLimitExceeded { .. } => ERR_DISCLOSURE_LIMIT,
            Self::IdentifierSpaceExhausted => ERR_ID_EXHAUSTED,
            Self::InvalidConfig(_) | Self::CorruptSnapshot(_) | Self::Core(_) => {
                ERR_INVALID_INPUT
            }
        }
    }

    /// Whether the error is an authorization failure (code 103).
    pub fn is_authorization(&self) -> bool {
        self.code() == ERR_UNAUTHORIZED
    }
}

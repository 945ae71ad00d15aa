//! # Ledger Configuration
//!
//! Fixed at ledger initialization. The owner is the single privileged
//! principal allowed to register institutions; it is not itself an
//! institution unless registered as one.
//!
//! ```yaml
//! owner: contract-owner
//! max_disclosures_per_credential: 64
//! ```

use serde::{Deserialize, Serialize};

use credledger_core::Principal;

use crate::error::LedgerError;

/// Default bound on distinct disclosed fields per credential.
pub const DEFAULT_MAX_DISCLOSURES: usize = 64;

fn default_max_disclosures() -> usize {
    DEFAULT_MAX_DISCLOSURES
}

/// Configuration supplied when a ledger is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The contract owner.
    pub owner: Principal,
    /// Maximum number of distinct disclosure fields a credential may carry.
    /// Overwriting an existing field does not count against it.
    #[serde(default = "default_max_disclosures")]
    pub max_disclosures_per_credential: usize,
}

impl LedgerConfig {
    /// Configuration with the given owner and default limits.
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            max_disclosures_per_credential: DEFAULT_MAX_DISCLOSURES,
        }
    }

    /// Override the per-credential disclosure limit.
    pub fn with_max_disclosures(mut self, limit: usize) -> Self {
        self.max_disclosures_per_credential = limit;
        self
    }

    /// Reject configurations the engine cannot operate with.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.max_disclosures_per_credential == 0 {
            return Err(LedgerError::InvalidConfig(
                "max_disclosures_per_credential must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

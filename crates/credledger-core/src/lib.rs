//! # credledger-core — Foundational Types for the Credential Ledger
//!
//! This crate defines the primitives every other crate in the workspace
//! builds on. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `Principal`, `CredentialId`,
//!    `CredentialHash`, `DisclosureField` are distinct types with validated
//!    constructors. An institution identity cannot be passed where a
//!    credential hash is expected.
//!
//! 2. **Credential identifiers are positive.** `CredentialId` rejects zero at
//!    construction, so the "no credential yet" counter value can never be
//!    mistaken for an allocated identifier.
//!
//! 3. **Disclosure content is opaque.** `DisclosureField` accepts any string,
//!    and [`scalar::deserialize`] lets string fields take unquoted YAML
//!    scalars.
//!
//! 4. **UTC-only timestamps.** `Timestamp` is UTC with seconds precision so
//!    that ledger snapshots serialize deterministically.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `credledger-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Identifier types deserialize through their validating constructors.

pub mod error;
pub mod identity;
pub mod scalar;
pub mod temporal;

pub use error::CoreError;
pub use identity::{CredentialHash, CredentialId, DisclosureField, Principal};
pub use temporal::Timestamp;

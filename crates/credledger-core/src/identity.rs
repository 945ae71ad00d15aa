//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifiers the credential ledger handles.
//! These prevent accidental identifier confusion: a `CredentialHash` cannot
//! be passed where a `Principal` is expected, and a credential identifier
//! is never a bare integer.
//!
//! ## Validation
//!
//! Every constructor validates its input, and deserialization routes through
//! the same constructor, so a snapshot loaded from disk cannot contain an
//! empty principal or a zero credential id. Disclosure field names are the
//! exception: any string, including the empty string, is a valid field.
//!
//! The string newtypes deserialize from any scalar (see [`crate::scalar`]),
//! so an unquoted `12345` in a YAML script is the hash `"12345"`.

use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::scalar;

fn require_non_empty(value: String, kind: &'static str) -> Result<String, CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::EmptyIdentifier { kind });
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Principal
// ---------------------------------------------------------------------------

/// An authenticated caller identity.
///
/// The ledger never verifies identities itself; the host has already
/// authenticated the caller. Principals are compared by exact string
/// equality, so `"university1"` and `"University1"` are different callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct Principal(String);

impl Principal {
    /// Create a principal, rejecting empty or whitespace-only values.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        require_non_empty(value.into(), "principal").map(Self)
    }

    /// Access the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Principal {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Self::new(scalar::deserialize(deserializer)?).map_err(de::Error::custom)
    }
}

impl From<Principal> for String {
    fn from(value: Principal) -> Self {
        value.0
    }
}

impl FromStr for Principal {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// CredentialId
// ---------------------------------------------------------------------------

/// Identifier of an issued credential.
///
/// Allocated by the ledger from a single monotonic counter: the first
/// credential is `1`, and identifiers are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct CredentialId(u64);

impl CredentialId {
    /// The first identifier the ledger allocates.
    pub const FIRST: CredentialId = CredentialId(1);

    /// Wrap a raw identifier, rejecting zero.
    pub fn new(value: u64) -> Result<Self, CoreError> {
        if value == 0 {
            return Err(CoreError::InvalidCredentialId(value));
        }
        Ok(Self(value))
    }

    /// The raw integer value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// The identifier allocated after this one, or `None` on overflow.
    pub fn next(&self) -> Option<CredentialId> {
        self.0.checked_add(1).map(Self)
    }
}

impl TryFrom<u64> for CredentialId {
    type Error = CoreError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CredentialId> for u64 {
    fn from(value: CredentialId) -> Self {
        value.0
    }
}

impl FromStr for CredentialId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u64 = s
            .trim()
            .parse()
            .map_err(|e| CoreError::Parse(format!("credential id {s:?}: {e}")))?;
        Self::new(raw)
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// CredentialHash
// ---------------------------------------------------------------------------

/// Opaque reference to off-chain credential content.
///
/// The ledger never hashes anything itself; it stores whatever reference
/// the issuer supplied and compares it byte-for-byte during verification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct CredentialHash(String);

impl CredentialHash {
    /// Create a credential hash reference, rejecting empty values.
    pub fn new(value: impl Into<String>) -> Result<Self, CoreError> {
        require_non_empty(value.into(), "credential hash").map(Self)
    }

    /// Access the raw hash string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CredentialHash {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for CredentialHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Self::new(scalar::deserialize(deserializer)?).map_err(de::Error::custom)
    }
}

impl From<CredentialHash> for String {
    fn from(value: CredentialHash) -> Self {
        value.0
    }
}

impl FromStr for CredentialHash {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for CredentialHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// DisclosureField
// ---------------------------------------------------------------------------

/// Name of a selectively disclosed field (e.g. `"gpa"`).
///
/// Field names are opaque and unvalidated; the empty string is a field
/// like any other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct DisclosureField(String);

impl DisclosureField {
    /// Wrap a field name.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the field name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DisclosureField {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DisclosureField {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for DisclosureField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        scalar::deserialize(deserializer).map(Self)
    }
}

impl From<DisclosureField> for String {
    fn from(value: DisclosureField) -> Self {
        value.0
    }
}

impl FromStr for DisclosureField {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl std::fmt::Display for DisclosureField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_principal_rejects_empty() {
        assert!(Principal::new("").is_err());
        assert!(Principal::new("   ").is_err());
        assert_eq!(Principal::new("university1").unwrap().as_str(), "university1");
    }

    #[test]
    fn test_principal_is_case_sensitive() {
        let a = Principal::new("university1").unwrap();
        let b = Principal::new("University1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_credential_id_rejects_zero() {
        assert_eq!(
            CredentialId::new(0).unwrap_err(),
            CoreError::InvalidCredentialId(0)
        );
        assert_eq!(CredentialId::new(1).unwrap(), CredentialId::FIRST);
    }

    #[test]
    fn test_credential_id_next_overflow() {
        let last = CredentialId::new(u64::MAX).unwrap();
        assert!(last.next().is_none());
        assert_eq!(CredentialId::FIRST.next().unwrap().get(), 2);
    }

    #[test]
    fn test_credential_id_from_str() {
        assert_eq!("42".parse::<CredentialId>().unwrap().get(), 42);
        assert!("0".parse::<CredentialId>().is_err());
        assert!("abc".parse::<CredentialId>().is_err());
        assert!("-1".parse::<CredentialId>().is_err());
    }

    #[test]
    fn test_hash_rejects_empty() {
        assert!(CredentialHash::new("").is_err());
        assert_eq!(CredentialHash::new("hash123").unwrap().to_string(), "hash123");
    }

    #[test]
    fn test_field_accepts_any_text() {
        assert_eq!(DisclosureField::new("").as_str(), "");
        assert_eq!(DisclosureField::new("  ").as_str(), "  ");
        assert_eq!("".parse::<DisclosureField>().unwrap(), DisclosureField::new(""));
        assert_eq!(
            serde_json::from_str::<DisclosureField>("\"\"").unwrap(),
            DisclosureField::new("")
        );
    }

    #[test]
    fn test_unquoted_yaml_scalars_deserialize() {
        let hash: CredentialHash = serde_yaml::from_str("12345").unwrap();
        assert_eq!(hash.as_str(), "12345");
        let caller: Principal = serde_yaml::from_str("1001").unwrap();
        assert_eq!(caller.as_str(), "1001");
        let field: DisclosureField = serde_yaml::from_str("2024").unwrap();
        assert_eq!(field.as_str(), "2024");
    }

    #[test]
    fn test_serde_is_transparent() {
        let p = Principal::new("student1").unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"student1\"");
        let id = CredentialId::new(7).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }

    #[test]
    fn test_deserialize_validates() {
        assert!(serde_json::from_str::<Principal>("\"\"").is_err());
        assert!(serde_json::from_str::<CredentialId>("0").is_err());
        assert!(serde_json::from_str::<CredentialHash>("\" \"").is_err());
        assert_eq!(
            serde_json::from_str::<CredentialId>("3").unwrap().get(),
            3
        );
    }

    proptest! {
        #[test]
        fn prop_credential_id_display_parses_back(n in 1u64..) {
            let id = CredentialId::new(n).unwrap();
            prop_assert_eq!(id.to_string().parse::<CredentialId>().unwrap(), id);
        }

        #[test]
        fn prop_next_is_strictly_greater(n in 1u64..u64::MAX) {
            let id = CredentialId::new(n).unwrap();
            let next = id.next().unwrap();
            prop_assert!(next > id);
            prop_assert_eq!(next.get(), n + 1);
        }
    }
}

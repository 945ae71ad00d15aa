//! # Scalar-as-String Deserialization
//!
//! Hand-written transaction scripts often leave values unquoted
//! (`value: 3.8`, `credential_hash: 12345`). Once buffered behind an
//! internally tagged enum those arrive as numbers or booleans rather than
//! strings, so string-typed fields accept any scalar and store its textual
//! rendering. Quote a value in YAML to keep its exact spelling (`"3.80"`).

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

/// Deserialize a string, or a number or boolean rendered as a string.
///
/// Use with `#[serde(deserialize_with = "credledger_core::scalar::deserialize")]`.
pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ScalarVisitor)
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        Ok(v.to_owned())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
        Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
        Ok(v.to_string())
    }
}

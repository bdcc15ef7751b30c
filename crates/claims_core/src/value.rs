//! Raw payload value model
//!
//! Client payloads are JSON objects whose values are strings or numbers
//! depending on how the submitting system serialized them. Rather than
//! inspecting `serde_json::Value` at every step, the pipeline works over a
//! closed [`ClaimValue`] union.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A scalar value as it arrives from a client
///
/// Anything outside this union (bool, array, nested object) is rejected at
/// the HTTP boundary when the payload is deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Null,
    Number(serde_json::Number),
    String(String),
}

impl fmt::Display for ClaimValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimValue::Null => write!(f, "null"),
            ClaimValue::Number(n) => write!(f, "{}", n),
            ClaimValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(s: &str) -> Self {
        ClaimValue::String(s.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(s: String) -> Self {
        ClaimValue::String(s)
    }
}

/// A raw claim exactly as submitted: key/value pairs in document order
///
/// Document order matters because two raw keys may normalize to the same
/// canonical key, and collision resolution is last-write-wins over the
/// order the keys appeared in the JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawClaim(Vec<(String, ClaimValue)>);

impl RawClaim {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a field, keeping document order
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ClaimValue>) {
        self.0.push((key.into(), value.into()));
    }

    /// Iterates fields in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClaimValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ClaimValue)> for RawClaim {
    fn from_iter<I: IntoIterator<Item = (String, ClaimValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for RawClaim {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RawClaimVisitor;

        impl<'de> Visitor<'de> for RawClaimVisitor {
            type Value = RawClaim;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a claim object with scalar values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, ClaimValue>()? {
                    entries.push((key, value));
                }
                Ok(RawClaim(entries))
            }
        }

        deserializer.deserialize_map(RawClaimVisitor)
    }
}

//! Key/value normalization
//!
//! Canonicalizes inconsistently spelled field names (`" Service Date "`,
//! `"Plan/Group #"`, `"Subscriber#"`) and strips currency decoration from
//! values, so that downstream parsing only ever sees lowercase snake-case
//! keys. Both functions are total: no input string can make them fail.
//!
//! If two distinct raw keys normalize to the same canonical key, the value
//! appearing later in the document wins. This last-write-wins behavior is
//! intentional and matches the upstream contract.

use std::collections::HashMap;

use crate::value::{ClaimValue, RawClaim};

/// A claim keyed by canonical field names, values currency-stripped
pub type NormalizedClaim = HashMap<String, ClaimValue>;

/// Canonicalizes a raw field name
///
/// Trims surrounding whitespace, expands every `#` to ` number` (with a
/// leading space so it separates from the preceding word), collapses every
/// maximal run of non-word characters (anything other than ASCII letters,
/// digits, underscore) into a single underscore, and lowercases the result.
///
/// ```
/// use claims_core::normalize_key;
///
/// assert_eq!(normalize_key("Plan/Group #"), "plan_group_number");
/// assert_eq!(normalize_key(" Service Date "), "service_date");
/// ```
pub fn normalize_key(raw: &str) -> String {
    let expanded = raw.trim().replace('#', " number");

    let mut out = String::with_capacity(expanded.len());
    let mut in_run = false;
    for ch in expanded.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch.to_ascii_lowercase());
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Strips decoration from a raw value
///
/// Strings are trimmed and have all leading `$` characters removed; numbers
/// and nulls pass through unchanged.
pub fn normalize_value(raw: &ClaimValue) -> ClaimValue {
    match raw {
        ClaimValue::String(s) => ClaimValue::String(s.trim().trim_start_matches('$').to_string()),
        other => other.clone(),
    }
}

/// Normalizes every key and value of a raw claim
///
/// Canonical-key collisions resolve last-write-wins in document order.
pub fn normalize_claim(raw: &RawClaim) -> NormalizedClaim {
    let mut normalized = NormalizedClaim::with_capacity(raw.len());
    for (key, value) in raw.iter() {
        normalized.insert(normalize_key(key), normalize_value(value));
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_expands_to_number_with_separator() {
        assert_eq!(normalize_key("Subscriber#"), "subscriber_number");
    }

    #[test]
    fn already_canonical_keys_are_stable() {
        assert_eq!(normalize_key("plan_group_number"), "plan_group_number");
    }

    #[test]
    fn dollar_prefix_is_stripped() {
        let value = ClaimValue::from(" $$100.00 ");
        assert_eq!(normalize_value(&value), ClaimValue::from("100.00"));
    }
}

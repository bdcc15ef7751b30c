//! Tests for key/value normalization

use claims_core::{normalize_claim, normalize_key, normalize_value, ClaimValue, RawClaim};
use proptest::prelude::*;

mod key_tests {
    use super::*;

    #[test]
    fn trims_and_lowercases() {
        assert_eq!(normalize_key(" Service Date "), "service_date");
    }

    #[test]
    fn expands_hash_after_slash_separated_words() {
        assert_eq!(normalize_key("Plan/Group #"), "plan_group_number");
    }

    #[test]
    fn expands_hash_glued_to_a_word() {
        assert_eq!(normalize_key("Subscriber#"), "subscriber_number");
    }

    #[test]
    fn collapses_punctuation_runs_to_one_underscore() {
        assert_eq!(normalize_key("member -- CoInsurance"), "member_coinsurance");
    }

    #[test]
    fn canonical_keys_are_fixed_points() {
        for key in [
            "service_date",
            "submitted_procedure",
            "quadrant",
            "plan_group_number",
            "subscriber_number",
            "provider_npi",
            "provider_fees",
            "member_coinsurance",
            "member_copay",
            "allowed_fees",
        ] {
            assert_eq!(normalize_key(key), key);
        }
    }

    #[test]
    fn total_over_arbitrary_input() {
        // No panic, whatever comes in
        normalize_key("");
        normalize_key("###");
        normalize_key("  \t\n ");
        normalize_key("日付");
    }
}

mod value_tests {
    use super::*;

    #[test]
    fn strips_whitespace_and_leading_dollars() {
        let raw = ClaimValue::from("  $$100.50 ");
        assert_eq!(normalize_value(&raw), ClaimValue::from("100.50"));
    }

    #[test]
    fn inner_dollar_signs_survive() {
        let raw = ClaimValue::from("$1$2");
        assert_eq!(normalize_value(&raw), ClaimValue::from("1$2"));
    }

    #[test]
    fn numbers_pass_through_unchanged() {
        let raw: ClaimValue = serde_json::from_str("100.0").unwrap();
        assert_eq!(normalize_value(&raw), raw);
    }

    #[test]
    fn null_passes_through_unchanged() {
        assert_eq!(normalize_value(&ClaimValue::Null), ClaimValue::Null);
    }
}

mod claim_tests {
    use super::*;

    #[test]
    fn normalizes_every_key_and_value() {
        let raw: RawClaim = serde_json::from_str(
            r#"{" Service Date ": "2024-06-24", "Provider NPI": "1234567890", "provider fees": "$100.00"}"#,
        )
        .unwrap();

        let normalized = normalize_claim(&raw);
        assert_eq!(
            normalized.get("service_date"),
            Some(&ClaimValue::from("2024-06-24"))
        );
        assert_eq!(
            normalized.get("provider_npi"),
            Some(&ClaimValue::from("1234567890"))
        );
        assert_eq!(
            normalized.get("provider_fees"),
            Some(&ClaimValue::from("100.00"))
        );
    }

    #[test]
    fn colliding_keys_resolve_last_write_wins() {
        let mut raw = RawClaim::new();
        raw.push("Subscriber#", "FIRST");
        raw.push("subscriber_number", "SECOND");

        let normalized = normalize_claim(&raw);
        assert_eq!(normalized.len(), 1);
        assert_eq!(
            normalized.get("subscriber_number"),
            Some(&ClaimValue::from("SECOND"))
        );
    }

    #[test]
    fn raw_claim_preserves_document_order() {
        let raw: RawClaim =
            serde_json::from_str(r#"{"b": "1", "a": "2", "B": "3"}"#).unwrap();
        let keys: Vec<&str> = raw.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "B"]);
    }
}

/// Decorates a canonical key with padding, case noise, and punctuation
/// separators that should all normalize away
fn decorate(base: &str, pad: (usize, usize), flips: &[bool], seps: &[&str]) -> String {
    let mut out = " ".repeat(pad.0);
    let mut letter = 0;
    let mut sep = 0;
    for ch in base.chars() {
        if ch == '_' {
            out.push_str(seps[sep % seps.len()]);
            sep += 1;
        } else {
            let upper = flips.get(letter).copied().unwrap_or(false);
            out.push(if upper { ch.to_ascii_uppercase() } else { ch });
            letter += 1;
        }
    }
    out.push_str(&" ".repeat(pad.1));
    out
}

proptest! {
    #[test]
    fn decorated_keys_normalize_to_canonical(
        base in prop::sample::select(vec![
            "service_date",
            "submitted_procedure",
            "plan_group_number",
            "subscriber_number",
            "provider_npi",
            "provider_fees",
            "member_coinsurance",
            "member_copay",
            "allowed_fees",
        ]),
        pad_before in 0usize..4,
        pad_after in 0usize..4,
        flips in prop::collection::vec(any::<bool>(), 0..24),
        seps in prop::collection::vec(
            prop::sample::select(vec!["_", " ", "/", "-", " / ", "--"]),
            1..4,
        ),
    ) {
        let decorated = decorate(base, (pad_before, pad_after), &flips, &seps);
        prop_assert_eq!(normalize_key(&decorated), base);
    }

    #[test]
    fn normalize_key_never_panics(raw in ".*") {
        normalize_key(&raw);
    }
}

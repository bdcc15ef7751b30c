//! Test Data Builders
//!
//! Builder patterns for constructing raw claim payloads with sensible
//! defaults. Tests specify only the relevant fields and use defaults for
//! everything else.

use claims_core::{ClaimValue, RawClaim};

/// Builder for raw claim payloads
///
/// Defaults describe a valid claim with a net fee of 80.00. Keys are stored
/// exactly as given, so tests can exercise non-normalized spellings.
#[derive(Debug, Clone)]
pub struct RawClaimBuilder {
    fields: Vec<(String, ClaimValue)>,
}

impl Default for RawClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RawClaimBuilder {
    /// Creates a builder preloaded with a valid claim
    pub fn new() -> Self {
        Self {
            fields: vec![
                field("service_date", "2024-06-24"),
                field("submitted_procedure", "D1234"),
                field("quadrant", "UR"),
                field("plan_group_number", "ABC123"),
                field("subscriber_number", "SUB123456"),
                field("provider_npi", "1234567890"),
                field("provider_fees", "100.00"),
                field("member_coinsurance", "20.00"),
                field("member_copay", "10.00"),
                field("allowed_fees", "50.00"),
            ],
        }
    }

    /// Overrides (or appends) a field value, keeping document order
    pub fn with(mut self, key: &str, value: impl Into<ClaimValue>) -> Self {
        let value = value.into();
        if let Some(existing) = self.fields.iter_mut().find(|(k, _)| k == key) {
            existing.1 = value;
        } else {
            self.fields.push((key.to_string(), value));
        }
        self
    }

    /// Removes a field entirely
    pub fn without(mut self, key: &str) -> Self {
        self.fields.retain(|(k, _)| k != key);
        self
    }

    /// Sets the provider NPI
    pub fn with_provider_npi(self, npi: &str) -> Self {
        self.with("provider_npi", npi)
    }

    /// Sets the provider fees
    pub fn with_provider_fees(self, fees: &str) -> Self {
        self.with("provider_fees", fees)
    }

    /// Sets the subscriber number
    pub fn with_subscriber_number(self, subscriber: &str) -> Self {
        self.with("subscriber_number", subscriber)
    }

    /// Builds the raw claim
    pub fn build(self) -> RawClaim {
        self.fields.into_iter().collect()
    }

    /// Builds a JSON object value for HTTP-shaped tests
    pub fn build_json(self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for (key, value) in self.fields {
            let json = match value {
                ClaimValue::Null => serde_json::Value::Null,
                ClaimValue::Number(n) => serde_json::Value::Number(n),
                ClaimValue::String(s) => serde_json::Value::String(s),
            };
            object.insert(key, json);
        }
        serde_json::Value::Object(object)
    }
}

fn field(key: &str, value: &str) -> (String, ClaimValue) {
    (key.to_string(), ClaimValue::from(value))
}

//! Tests for payload shapes and error mapping

use axum::http::StatusCode;
use axum::response::IntoResponse;

use claims_core::ClaimError;
use infra_db::DatabaseError;
use interface_api::dto::ClaimsPayload;
use interface_api::error::ApiError;
use test_utils::RawClaimBuilder;

mod payload_tests {
    use super::*;

    #[test]
    fn single_object_becomes_a_batch_of_one() {
        let json = RawClaimBuilder::new().build_json().to_string();
        let payload: ClaimsPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(payload.into_items().len(), 1);
    }

    #[test]
    fn array_keeps_every_item_in_order() {
        let first = RawClaimBuilder::new().with_provider_npi("1111111111").build_json();
        let second = RawClaimBuilder::new().with_provider_npi("2222222222").build_json();
        let json = serde_json::Value::Array(vec![first, second]).to_string();

        let payload: ClaimsPayload = serde_json::from_str(&json).unwrap();
        let items = payload.into_items();
        assert_eq!(items.len(), 2);

        let npis: Vec<String> = items
            .iter()
            .map(|raw| {
                raw.iter()
                    .find(|(k, _)| *k == "provider_npi")
                    .map(|(_, v)| v.to_string())
                    .unwrap()
            })
            .collect();
        assert_eq!(npis, vec!["1111111111", "2222222222"]);
    }

    #[test]
    fn boolean_values_are_rejected_at_the_boundary() {
        let result: Result<ClaimsPayload, _> =
            serde_json::from_str(r#"{"service_date": true}"#);
        assert!(result.is_err());
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_422() {
        let err = ApiError::from(vec![ClaimError::MissingField("service_date")]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn uniqueness_conflicts_map_to_400() {
        let err = ApiError::from(DatabaseError::DuplicateEntry("claim exists".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_claims_map_to_404() {
        let err = ApiError::from(DatabaseError::not_found("Claim", 99999));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rate_limiting_maps_to_429() {
        let response = ApiError::RateLimited.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn unexpected_failures_map_to_500_without_detail() {
        let response =
            ApiError::Internal("connection refused at 10.1.2.3".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn validation_body_carries_per_field_details() {
        let err = ApiError::from(vec![
            ClaimError::MissingField("service_date"),
            ClaimError::constraint("provider_fees", "must be non-negative"),
        ]);
        let response = err.into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["error"], "validation_error");
        let details = body["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["field"], "service_date");
        assert_eq!(details[1]["field"], "provider_fees");
    }

    #[tokio::test]
    async fn internal_body_does_not_leak_the_cause() {
        let response =
            ApiError::Internal("password=hunter2 connection refused".to_string()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Internal server error");
    }
}

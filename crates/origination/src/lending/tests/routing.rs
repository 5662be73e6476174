use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rust_decimal_macros::dec;
use serde_json::Value;

use tower::ServiceExt;

use super::common::*;
use crate::lending::domain::RegistrationRequest;
use crate::lending::router::{
    check_eligibility_handler, create_loan_handler, lending_router, loan_detail_handler,
    register_handler,
};
use crate::lending::service::LoanOriginationService;

fn registration(age: u8) -> RegistrationRequest {
    RegistrationRequest {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        age,
        monthly_income: dec!(50000),
        phone_number: "9890001122".to_string(),
    }
}

#[tokio::test]
async fn register_handler_returns_created_with_the_derived_limit() {
    let service = Arc::new(service());

    let response = register_handler(State(service), axum::Json(registration(34))).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = to_bytes(response.into_body(), 4096).await.expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload.get("name").and_then(Value::as_str), Some("Asha Rao"));
    assert_eq!(
        payload.get("approved_limit").and_then(Value::as_str),
        Some("1800000")
    );
}

#[tokio::test]
async fn register_handler_rejects_an_underage_applicant() {
    let service = Arc::new(service());

    let response = register_handler(State(service), axum::Json(registration(17))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), 4096).await.expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    let violations = payload
        .get("violations")
        .and_then(Value::as_array)
        .expect("violations array");
    assert_eq!(
        violations[0].get("field").and_then(Value::as_str),
        Some("age")
    );
}

#[tokio::test]
async fn eligibility_handler_returns_not_found_for_a_missing_customer() {
    let service = Arc::new(service());
    let request = loan_request(42, dec!(100000), dec!(10), 12);

    let response = check_eligibility_handler(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_loan_handler_approves_a_fresh_customer() {
    let service = Arc::new(service());
    service
        .register_customer(registration(34))
        .expect("registration succeeds");
    let request = loan_request(1, dec!(100000), dec!(10), 12);

    let response = create_loan_handler(State(service), axum::Json(request)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), 4096).await.expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload.get("approved").and_then(Value::as_bool), Some(true));
    assert_eq!(
        payload.get("monthly_installment").and_then(Value::as_str),
        Some("8884.88")
    );
}

#[tokio::test]
async fn loan_detail_handler_returns_not_found_for_a_missing_loan() {
    let service = Arc::new(service());

    let response = loan_detail_handler(State(service), Path(99)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn router_wires_the_eligibility_endpoint() {
    let service = Arc::new(service());
    service
        .register_customer(registration(34))
        .expect("registration succeeds");
    let router = lending_router(service);

    let body = serde_json::to_vec(&loan_request(1, dec!(100000), dec!(10), 12))
        .expect("request serializes");
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/loans/check-eligibility")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body))
        .expect("request builds");

    let response = router.oneshot(request).await.expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), 4096).await.expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload.get("approved").and_then(Value::as_bool), Some(true));
    assert_eq!(
        payload.get("corrected_interest_rate").and_then(Value::as_str),
        Some("12.0")
    );
}

#[tokio::test]
async fn handlers_surface_store_failures_as_internal_errors() {
    let service = Arc::new(LoanOriginationService::new(
        Arc::new(UnavailableRepository),
        policy_config(),
    ));

    let response = loan_detail_handler(State(service), Path(1)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::{CustomerId, LoanId, LoanRequest, RegistrationRequest};
use super::repository::LendingRepository;
use super::service::{LoanOriginationService, ServiceError};

/// Router builder exposing the lending endpoints.
pub fn lending_router<R>(service: Arc<LoanOriginationService<R>>) -> Router
where
    R: LendingRepository + 'static,
{
    Router::new()
        .route("/api/v1/customers/register", post(register_handler::<R>))
        .route(
            "/api/v1/customers/:customer_id/loans",
            get(customer_loans_handler::<R>),
        )
        .route(
            "/api/v1/loans/check-eligibility",
            post(check_eligibility_handler::<R>),
        )
        .route("/api/v1/loans", post(create_loan_handler::<R>))
        .route("/api/v1/loans/:loan_id", get(loan_detail_handler::<R>))
        .with_state(service)
}

fn error_response(error: ServiceError) -> Response {
    match error {
        ServiceError::CustomerNotFound | ServiceError::LoanNotFound => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        ServiceError::Validation(validation) => {
            let payload = json!({
                "error": validation.to_string(),
                "violations": validation.violations,
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        ServiceError::Repository(repository) => {
            let payload = json!({ "error": repository.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<LoanOriginationService<R>>>,
    axum::Json(request): axum::Json<RegistrationRequest>,
) -> Response
where
    R: LendingRepository + 'static,
{
    match service.register_customer(request) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn check_eligibility_handler<R>(
    State(service): State<Arc<LoanOriginationService<R>>>,
    axum::Json(request): axum::Json<LoanRequest>,
) -> Response
where
    R: LendingRepository + 'static,
{
    let today = Local::now().date_naive();
    match service.check_eligibility(&request, today) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_loan_handler<R>(
    State(service): State<Arc<LoanOriginationService<R>>>,
    axum::Json(request): axum::Json<LoanRequest>,
) -> Response
where
    R: LendingRepository + 'static,
{
    let today = Local::now().date_naive();
    match service.create_loan(&request, today) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn loan_detail_handler<R>(
    State(service): State<Arc<LoanOriginationService<R>>>,
    Path(loan_id): Path<u64>,
) -> Response
where
    R: LendingRepository + 'static,
{
    match service.loan_detail(LoanId(loan_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn customer_loans_handler<R>(
    State(service): State<Arc<LoanOriginationService<R>>>,
    Path(customer_id): Path<u64>,
) -> Response
where
    R: LendingRepository + 'static,
{
    let today = Local::now().date_naive();
    match service.active_loans(CustomerId(customer_id), today) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => error_response(error),
    }
}

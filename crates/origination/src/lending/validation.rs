use rust_decimal::Decimal;
use serde::Serialize;

use super::config::PolicyConfig;
use super::domain::{Customer, LoanRequest, RegistrationRequest};

pub const MIN_AGE: u8 = 18;
pub const MAX_AGE: u8 = 100;

/// A single rejected field with its reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Accumulated field violations. Every check runs before the request is
/// rejected; only the customer lookup itself fails fast, upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("validation failed for {}", self.fields())]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    fn fields(&self) -> String {
        self.violations
            .iter()
            .map(|violation| violation.field)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn validate_registration(
    request: &RegistrationRequest,
    phone_in_use: bool,
) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    if !(MIN_AGE..=MAX_AGE).contains(&request.age) {
        violations.push(FieldViolation {
            field: "age",
            message: format!("age must be between {MIN_AGE} and {MAX_AGE}"),
        });
    }

    if request.phone_number.trim().is_empty() {
        violations.push(FieldViolation {
            field: "phone_number",
            message: "phone number must not be empty".to_string(),
        });
    } else if phone_in_use {
        violations.push(FieldViolation {
            field: "phone_number",
            message: "phone number already registered".to_string(),
        });
    }

    if request.monthly_income < Decimal::ZERO {
        violations.push(FieldViolation {
            field: "monthly_income",
            message: "monthly income must not be negative".to_string(),
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

pub fn validate_loan_request(
    request: &LoanRequest,
    customer: &Customer,
    config: &PolicyConfig,
) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    if request.loan_amount <= Decimal::ZERO {
        violations.push(FieldViolation {
            field: "loan_amount",
            message: "loan amount must be positive".to_string(),
        });
    } else if request.loan_amount > customer.approved_limit {
        violations.push(FieldViolation {
            field: "loan_amount",
            message: format!(
                "loan amount exceeds the approved limit of {}",
                customer.approved_limit
            ),
        });
    }

    if request.interest_rate < Decimal::ZERO || request.interest_rate > config.max_interest_rate {
        violations.push(FieldViolation {
            field: "interest_rate",
            message: format!(
                "interest rate must be between 0 and {}",
                config.max_interest_rate
            ),
        });
    }

    if request.tenure_months < 1 || request.tenure_months > config.max_tenure_months {
        violations.push(FieldViolation {
            field: "tenure_months",
            message: format!(
                "tenure must be between 1 and {} months",
                config.max_tenure_months
            ),
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

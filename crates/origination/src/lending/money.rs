//! Fixed-point currency and rate arithmetic.
//!
//! All money paths use `rust_decimal::Decimal` with half-up rounding at the
//! quantization boundaries. No `f64`.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Approved limits are quoted in whole lakhs.
pub const LIMIT_ROUNDING_STEP: Decimal = dec!(100000);

/// Raised when a decimal computation cannot produce a representable value.
#[derive(Debug, thiserror::Error)]
pub enum ComputationError {
    #[error("decimal overflow while {context}")]
    Overflow { context: &'static str },
    #[error("division by zero while {context}")]
    DivisionByZero { context: &'static str },
}

/// Quantize a currency value to cents, half-up.
pub fn to_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Credit limit extended at registration: a salary multiple rounded to the
/// nearest lakh, half-up.
pub fn approved_limit(monthly_salary: Decimal, salary_multiplier: Decimal) -> Decimal {
    let raw = salary_multiplier * monthly_salary;
    (raw / LIMIT_ROUNDING_STEP).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        * LIMIT_ROUNDING_STEP
}

/// `base^periods` by repeated checked multiplication.
pub fn compound_factor(base: Decimal, periods: u32) -> Result<Decimal, ComputationError> {
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = factor.checked_mul(base).ok_or(ComputationError::Overflow {
            context: "compounding the monthly growth factor",
        })?;
    }
    Ok(factor)
}

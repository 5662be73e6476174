//! Equated monthly installment arithmetic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::money::{self, ComputationError};

/// Monthly installment for a principal at an annual percentage rate over a
/// tenure in months.
///
/// A zero rate divides the principal evenly; otherwise the standard
/// amortization formula `P·r·(1+r)^n / ((1+r)^n − 1)` applies with the
/// monthly rate `r = annual / 100 / 12`. The result is quantized to cents,
/// half-up. Callers that must not fail map errors to a zero installment and
/// treat that zero as a degraded computation, never as a free loan.
pub fn monthly_installment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    tenure_months: u32,
) -> Result<Decimal, ComputationError> {
    if tenure_months == 0 {
        return Err(ComputationError::DivisionByZero {
            context: "spreading a principal across a zero-month tenure",
        });
    }

    let monthly_rate = annual_rate_percent / dec!(100) / dec!(12);
    if monthly_rate.is_zero() {
        return Ok(money::to_currency(principal / Decimal::from(tenure_months)));
    }

    let growth = money::compound_factor(Decimal::ONE + monthly_rate, tenure_months)?;
    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(ComputationError::DivisionByZero {
            context: "amortizing an installment",
        });
    }

    let numerator = principal
        .checked_mul(monthly_rate)
        .and_then(|value| value.checked_mul(growth))
        .ok_or(ComputationError::Overflow {
            context: "amortizing an installment",
        })?;

    Ok(money::to_currency(numerator / denominator))
}

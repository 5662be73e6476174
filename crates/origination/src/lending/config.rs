use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Lending policy knobs shared by scoring, rate correction, the
/// affordability gate, and request validation. The defaults carry the
/// production rulebook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Score assigned to a customer with no loan history.
    pub new_customer_score: u8,
    /// Scores strictly above this keep the requested rate.
    pub prime_score_floor: u8,
    /// Scores strictly above this (and at most `prime_score_floor`) are
    /// floored at `moderate_rate_floor`.
    pub moderate_score_floor: u8,
    /// Scores at or below this are declined outright.
    pub reject_score_ceiling: u8,
    pub moderate_rate_floor: Decimal,
    pub subprime_rate_floor: Decimal,
    /// Active repayments plus the new installment must stay within this
    /// fraction of monthly salary.
    pub emi_to_salary_ratio: Decimal,
    /// Multiple of monthly salary extended as the approved limit.
    pub salary_limit_multiplier: Decimal,
    pub max_interest_rate: Decimal,
    pub max_tenure_months: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            new_customer_score: 50,
            prime_score_floor: 50,
            moderate_score_floor: 30,
            reject_score_ceiling: 10,
            moderate_rate_floor: dec!(12.0),
            subprime_rate_floor: dec!(16.0),
            emi_to_salary_ratio: dec!(0.5),
            salary_limit_multiplier: dec!(36),
            max_interest_rate: dec!(50),
            max_tenure_months: 360,
        }
    }
}

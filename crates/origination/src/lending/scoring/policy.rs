use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::super::config::PolicyConfig;

/// Outcome of applying the score-banded rate floors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RateDecision {
    Approved { rate: Decimal },
    Rejected,
}

/// Map a credit score to the minimum acceptable interest rate.
///
/// Prime scores keep the requested rate; the two middle bands floor it at
/// the configured minimums; scores at or below the rejection ceiling are a
/// hard decline and produce no rate at all.
pub fn correct_rate(score: u8, requested_rate: Decimal, config: &PolicyConfig) -> RateDecision {
    if score > config.prime_score_floor {
        RateDecision::Approved {
            rate: requested_rate,
        }
    } else if score > config.moderate_score_floor {
        RateDecision::Approved {
            rate: requested_rate.max(config.moderate_rate_floor),
        }
    } else if score > config.reject_score_ceiling {
        RateDecision::Approved {
            rate: requested_rate.max(config.subprime_rate_floor),
        }
    } else {
        RateDecision::Rejected
    }
}

/// EMI gate: repayments on active loans plus the new installment must stay
/// within the configured fraction of monthly salary, boundary inclusive.
pub fn within_affordability(
    monthly_salary: Decimal,
    active_repayments: Decimal,
    new_installment: Decimal,
    config: &PolicyConfig,
) -> bool {
    active_repayments + new_installment <= monthly_salary * config.emi_to_salary_ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config() -> PolicyConfig {
        PolicyConfig::default()
    }

    #[test]
    fn prime_scores_keep_the_requested_rate() {
        let decision = correct_rate(51, dec!(8.5), &config());
        assert_eq!(
            decision,
            RateDecision::Approved { rate: dec!(8.5) }
        );
    }

    #[test]
    fn moderate_scores_are_floored_at_twelve_percent() {
        assert_eq!(
            correct_rate(50, dec!(10), &config()),
            RateDecision::Approved { rate: dec!(12.0) }
        );
        assert_eq!(
            correct_rate(31, dec!(14), &config()),
            RateDecision::Approved { rate: dec!(14) }
        );
    }

    #[test]
    fn subprime_scores_are_floored_at_sixteen_percent() {
        assert_eq!(
            correct_rate(30, dec!(10), &config()),
            RateDecision::Approved { rate: dec!(16.0) }
        );
        assert_eq!(
            correct_rate(11, dec!(18), &config()),
            RateDecision::Approved { rate: dec!(18) }
        );
    }

    #[test]
    fn scores_at_or_below_the_ceiling_are_rejected() {
        assert_eq!(correct_rate(10, dec!(10), &config()), RateDecision::Rejected);
        assert_eq!(correct_rate(0, dec!(10), &config()), RateDecision::Rejected);
    }

    #[test]
    fn rate_floors_never_decrease_as_scores_fall() {
        let requested = dec!(9);
        let mut last_floor = Decimal::ZERO;
        for score in (11..=100).rev() {
            match correct_rate(score, requested, &config()) {
                RateDecision::Approved { rate } => {
                    assert!(rate >= last_floor, "floor fell at score {score}");
                    last_floor = rate;
                }
                RateDecision::Rejected => panic!("score {score} should not reject"),
            }
        }
    }

    #[test]
    fn affordability_boundary_is_inclusive() {
        let config = config();
        assert!(within_affordability(
            dec!(50000),
            dec!(16115.12),
            dec!(8884.88),
            &config
        ));
        assert!(!within_affordability(
            dec!(50000),
            dec!(16115.13),
            dec!(8884.88),
            &config
        ));
        assert!(within_affordability(
            dec!(50000),
            Decimal::ZERO,
            dec!(25000),
            &config
        ));
    }
}

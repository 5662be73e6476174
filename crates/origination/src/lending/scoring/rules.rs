use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::super::domain::{Customer, Loan};
use super::super::money::ComputationError;
use super::{ScoreComponent, ScoreFactor};

pub(crate) struct ScoreSignals {
    pub active_exposure: Decimal,
}

/// Compute the five weighted sub-scores for a customer with at least one
/// loan, returning the clamped integer total alongside the component trail.
pub(crate) fn score_history(
    customer: &Customer,
    loans: &[Loan],
    today: NaiveDate,
) -> Result<(Vec<ScoreComponent>, u8, ScoreSignals), ComputationError> {
    let mut components = Vec::new();
    let mut total = Decimal::ZERO;

    // Payment history, up to 35 points from the on-time EMI ratio.
    let emis_due: u64 = loans.iter().map(|loan| u64::from(loan.tenure_months)).sum();
    let emis_on_time: u64 = loans
        .iter()
        .map(|loan| u64::from(loan.emis_paid_on_time))
        .sum();
    if emis_due > 0 {
        let ratio = Decimal::from(emis_on_time) / Decimal::from(emis_due);
        let points = ratio
            .checked_mul(dec!(35))
            .ok_or(ComputationError::Overflow {
                context: "weighting the payment history ratio",
            })?;
        total += points;
        components.push(ScoreComponent {
            factor: ScoreFactor::PaymentHistory,
            points,
            notes: format!("{emis_on_time} of {emis_due} EMIs paid on time"),
        });
    }

    // Utilization of the approved limit, counting loans still running today.
    let active_exposure = loans
        .iter()
        .filter(|loan| loan.is_active(today))
        .try_fold(Decimal::ZERO, |sum, loan| sum.checked_add(loan.amount))
        .ok_or(ComputationError::Overflow {
            context: "summing active loan exposure",
        })?;
    if customer.approved_limit > Decimal::ZERO {
        let ratio = active_exposure / customer.approved_limit;
        let points = if ratio <= dec!(0.3) {
            dec!(30)
        } else if ratio <= dec!(0.5) {
            dec!(20)
        } else if ratio <= dec!(0.7) {
            dec!(15)
        } else if ratio <= dec!(1.0) {
            dec!(10)
        } else {
            Decimal::ZERO
        };
        total += points;
        components.push(ScoreComponent {
            factor: ScoreFactor::Utilization,
            points,
            notes: format!("{ratio:.2} of the approved limit is in use"),
        });
    }

    // History length in years since the earliest loan.
    if let Some(earliest) = loans.iter().map(|loan| loan.start_date).min() {
        let days = (today - earliest).num_days();
        let years = Decimal::from(days) / dec!(365.25);
        let points = if years >= dec!(7) {
            dec!(15)
        } else if years >= dec!(5) {
            dec!(12)
        } else if years >= dec!(3) {
            dec!(10)
        } else if years >= dec!(1) {
            dec!(7)
        } else {
            dec!(3)
        };
        total += points;
        components.push(ScoreComponent {
            factor: ScoreFactor::HistoryLength,
            points,
            notes: format!("history spans {years:.1} years"),
        });
    }

    // Loans opened in the current calendar year.
    let recent = loans
        .iter()
        .filter(|loan| loan.start_date.year() == today.year())
        .count();
    let points = match recent {
        0 => dec!(10),
        1..=2 => dec!(8),
        3..=4 => dec!(5),
        _ => dec!(2),
    };
    total += points;
    components.push(ScoreComponent {
        factor: ScoreFactor::RecentActivity,
        points,
        notes: format!("{recent} loan(s) opened this calendar year"),
    });

    // Book size.
    let count = loans.len();
    let points = match count {
        1 => dec!(7),
        2..=5 => dec!(10),
        6..=10 => dec!(5),
        _ => dec!(2),
    };
    total += points;
    components.push(ScoreComponent {
        factor: ScoreFactor::Diversity,
        points,
        notes: format!("{count} loan(s) on the book"),
    });

    let truncated = total.trunc().to_i64().ok_or(ComputationError::Overflow {
        context: "truncating the composite score",
    })?;
    let score = truncated.clamp(0, 100) as u8;

    Ok((components, score, ScoreSignals { active_exposure }))
}

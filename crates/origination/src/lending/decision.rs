//! Eligibility and origination decisioning.
//!
//! The pipeline runs RECEIVED → SCORED → RATE_DECIDED → AFFORDABILITY_CHECKED
//! and lands on approval or a decline with a machine-readable reason. A hard
//! decline from the rate policy skips the affordability gate entirely.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::PolicyConfig;
use super::domain::{Customer, Loan, LoanRequest};
use super::installment;
use super::scoring::policy::{self, RateDecision};
use super::scoring::ScoringEngine;

/// Business decline reasons; outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclineReason {
    CreditScoreTooLow,
    EmiExceedsSalaryThreshold,
}

impl DeclineReason {
    pub const fn message(self) -> &'static str {
        match self {
            DeclineReason::CreditScoreTooLow => "credit score too low",
            DeclineReason::EmiExceedsSalaryThreshold => "EMI exceeds salary threshold",
        }
    }
}

/// Outcome of running a validated loan request through scoring, rate
/// correction, and the affordability gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDecision {
    pub approved: bool,
    pub credit_score: u8,
    pub requested_rate: Decimal,
    /// The rate the loan would carry; equals the requested rate when no
    /// floor applied, and echoes it on a hard decline.
    pub corrected_rate: Decimal,
    pub tenure_months: u32,
    /// Zero when no installment was computed (hard decline or degraded
    /// arithmetic).
    pub monthly_installment: Decimal,
    pub decline_reason: Option<DeclineReason>,
    /// True when a sub-computation failed and a safe default was
    /// substituted.
    pub degraded: bool,
}

/// Applies the decision pipeline to an already-validated request. Pure: the
/// caller supplies the customer, their full loan history, and today's date;
/// nothing is persisted here.
pub struct DecisionEngine {
    scoring: ScoringEngine,
    config: PolicyConfig,
}

impl DecisionEngine {
    pub fn new(config: PolicyConfig) -> Self {
        Self {
            scoring: ScoringEngine::new(config.clone()),
            config,
        }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn decide(
        &self,
        customer: &Customer,
        loans: &[Loan],
        request: &LoanRequest,
        today: NaiveDate,
    ) -> LoanDecision {
        let report = self.scoring.score(customer, loans, today);

        let corrected_rate =
            match policy::correct_rate(report.score, request.interest_rate, &self.config) {
                RateDecision::Approved { rate } => rate,
                RateDecision::Rejected => {
                    return LoanDecision {
                        approved: false,
                        credit_score: report.score,
                        requested_rate: request.interest_rate,
                        corrected_rate: request.interest_rate,
                        tenure_months: request.tenure_months,
                        monthly_installment: Decimal::ZERO,
                        decline_reason: Some(DeclineReason::CreditScoreTooLow),
                        degraded: report.degraded,
                    };
                }
            };

        let (monthly_installment, installment_degraded) = match installment::monthly_installment(
            request.loan_amount,
            corrected_rate,
            request.tenure_months,
        ) {
            Ok(amount) => (amount, false),
            Err(error) => {
                tracing::warn!(
                    customer_id = customer.id.0,
                    error = %error,
                    "installment computation degraded, declining through the EMI gate"
                );
                (Decimal::ZERO, true)
            }
        };

        let active_repayments: Decimal = loans
            .iter()
            .filter(|loan| loan.is_active(today))
            .map(|loan| loan.monthly_repayment)
            .sum();

        // A degraded installment never originates a zero-EMI loan.
        let affordable = !installment_degraded
            && policy::within_affordability(
                customer.monthly_salary,
                active_repayments,
                monthly_installment,
                &self.config,
            );

        LoanDecision {
            approved: affordable,
            credit_score: report.score,
            requested_rate: request.interest_rate,
            corrected_rate,
            tenure_months: request.tenure_months,
            monthly_installment,
            decline_reason: if affordable {
                None
            } else {
                Some(DeclineReason::EmiExceedsSalaryThreshold)
            },
            degraded: report.degraded || installment_degraded,
        }
    }
}

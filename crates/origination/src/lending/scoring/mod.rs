pub mod policy;
pub(crate) mod rules;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::config::PolicyConfig;
use super::domain::{Customer, CustomerId, Loan};

/// Factors contributing to a credit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreFactor {
    PaymentHistory,
    Utilization,
    HistoryLength,
    RecentActivity,
    Diversity,
    NewCustomer,
    ExposureOverride,
}

/// Discrete contribution to a score, kept so decisions can be audited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: Decimal,
    pub notes: String,
}

/// A 0-100 credit score with its component trail. `degraded` marks scores
/// substituted after an internal computation failure; callers still receive
/// a valid score value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditReport {
    pub customer_id: CustomerId,
    pub score: u8,
    pub components: Vec<ScoreComponent>,
    pub degraded: bool,
}

/// Stateless engine turning a customer's loan history into a credit score.
pub struct ScoringEngine {
    config: PolicyConfig,
}

impl ScoringEngine {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Score a customer from their full loan history as of `today`.
    ///
    /// Never fails: customers without history receive the neutral default,
    /// and internal computation failures degrade to a zero score that is
    /// surfaced only through diagnostics.
    pub fn score(&self, customer: &Customer, loans: &[Loan], today: NaiveDate) -> CreditReport {
        if loans.is_empty() {
            return CreditReport {
                customer_id: customer.id,
                score: self.config.new_customer_score,
                components: vec![ScoreComponent {
                    factor: ScoreFactor::NewCustomer,
                    points: Decimal::from(self.config.new_customer_score),
                    notes: "no loan history, neutral default applies".to_string(),
                }],
                degraded: false,
            };
        }

        match rules::score_history(customer, loans, today) {
            Ok((mut components, mut score, signals)) => {
                if signals.active_exposure > customer.approved_limit {
                    components.push(ScoreComponent {
                        factor: ScoreFactor::ExposureOverride,
                        points: Decimal::ZERO,
                        notes: format!(
                            "active exposure {} exceeds the approved limit {}",
                            signals.active_exposure, customer.approved_limit
                        ),
                    });
                    score = 0;
                }
                for component in &components {
                    tracing::debug!(
                        customer_id = customer.id.0,
                        factor = ?component.factor,
                        points = %component.points,
                        "score component"
                    );
                }
                CreditReport {
                    customer_id: customer.id,
                    score,
                    components,
                    degraded: false,
                }
            }
            Err(error) => {
                tracing::warn!(
                    customer_id = customer.id.0,
                    error = %error,
                    "credit scoring degraded, substituting a zero score"
                );
                CreditReport {
                    customer_id: customer.id,
                    score: 0,
                    components: Vec::new(),
                    degraded: true,
                }
            }
        }
    }
}

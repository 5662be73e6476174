//! Lending pipeline: domain model, credit scoring, rate policy, installment
//! arithmetic, request validation, and the origination service with its
//! repository seam.

pub mod config;
pub mod decision;
pub mod domain;
pub mod ingestion;
pub mod installment;
pub mod money;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use config::PolicyConfig;
pub use decision::{DeclineReason, DecisionEngine, LoanDecision};
pub use domain::{
    ActiveLoanView, Customer, CustomerContactView, CustomerId, CustomerView, Loan, LoanDetailView,
    LoanId, LoanRequest, RegistrationRequest,
};
pub use ingestion::{BulkIngestor, IngestError, IngestReport};
pub use money::ComputationError;
pub use repository::{LendingRepository, NewCustomer, NewLoan, RepositoryError};
pub use router::lending_router;
pub use scoring::policy::{correct_rate, within_affordability, RateDecision};
pub use scoring::{CreditReport, ScoreComponent, ScoreFactor, ScoringEngine};
pub use service::{EligibilityReport, LoanOriginationService, OriginationReceipt, ServiceError};
pub use validation::{FieldViolation, ValidationError};

//! Loan-origination core.
//!
//! The `lending` module holds the domain model and the decision pipeline:
//! credit scoring, rate correction, installment arithmetic, the
//! affordability gate, and the origination service that ties them to a
//! pluggable repository. `config` and `telemetry` carry the runtime
//! scaffolding shared with the API service.

pub mod config;
pub mod error;
pub mod lending;
pub mod telemetry;

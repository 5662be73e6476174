use std::fs::File;
use std::path::Path;

use crate::cli::IngestArgs;
use crate::infra::InMemoryLendingRepository;
use origination::error::AppError;
use origination::lending::{BulkIngestor, IngestReport};

/// Dry-run a bulk load into a scratch repository and print the counters.
pub(crate) fn run(args: IngestArgs) -> Result<(), AppError> {
    let repository = InMemoryLendingRepository::default();
    let report = load_books(
        &repository,
        args.customers.as_deref(),
        args.loans.as_deref(),
    )?;

    println!(
        "customers: {} added, {} already present",
        report.customers_added, report.customers_existing
    );
    println!(
        "loans: {} added, {} already present, {} skipped (unknown customer)",
        report.loans_added, report.loans_existing, report.loans_orphaned
    );
    Ok(())
}

/// Load both books into `repository`, in customer-then-loan order so loan
/// rows can resolve their owners.
pub(crate) fn load_books(
    repository: &InMemoryLendingRepository,
    customers: Option<&Path>,
    loans: Option<&Path>,
) -> Result<IngestReport, AppError> {
    let ingestor = BulkIngestor::new(repository);
    let mut report = IngestReport::default();

    if let Some(path) = customers {
        let file = File::open(path)?;
        ingestor.load_customers(file, &mut report)?;
    }
    if let Some(path) = loans {
        let file = File::open(path)?;
        ingestor.load_loans(file, &mut report)?;
    }

    Ok(report)
}

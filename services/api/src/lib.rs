mod cli;
mod demo;
mod infra;
mod ingest;
mod routes;
mod server;

use origination::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

use crate::demo::{run_demo, DemoArgs};
use crate::{ingest, server};
use clap::{Args, Parser, Subcommand};
use origination::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Origination Service",
    about = "Run the loan-origination service and its data tooling from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate customer and loan CSV exports without serving
    Ingest(IngestArgs),
    /// Run an end-to-end origination walkthrough in process
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the customer book from a CSV export before serving
    #[arg(long)]
    pub(crate) customers_csv: Option<PathBuf>,
    /// Seed the loan book from a CSV export before serving
    #[arg(long)]
    pub(crate) loans_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct IngestArgs {
    /// Customer CSV export to validate
    #[arg(long)]
    pub(crate) customers: Option<PathBuf>,
    /// Loan CSV export to validate
    #[arg(long)]
    pub(crate) loans: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Ingest(args) => ingest::run(args),
        Command::Demo(args) => run_demo(args),
    }
}

use crate::cli::ServeArgs;
use crate::infra::{default_policy_config, AppState, InMemoryLendingRepository};
use crate::ingest;
use crate::routes::with_lending_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use origination::config::AppConfig;
use origination::error::AppError;
use origination::lending::LoanOriginationService;
use origination::telemetry;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryLendingRepository::default());
    if args.customers_csv.is_some() || args.loans_csv.is_some() {
        let report = ingest::load_books(
            &repository,
            args.customers_csv.as_deref(),
            args.loans_csv.as_deref(),
        )?;
        info!(
            customers = report.customers_added,
            loans = report.loans_added,
            orphaned = report.loans_orphaned,
            "seeded the lending book"
        );
    }

    let service = Arc::new(LoanOriginationService::new(
        repository,
        default_policy_config(),
    ));

    let app = with_lending_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "loan origination service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

use crate::cli::ServeArgs;
use crate::infra::{
    default_scoring_config, AppState, InMemoryProcurementRepository, LoggingMailer,
    SimulatedOracle,
};
use crate::routes::with_procurement_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use rfp_advisor::config::AppConfig;
use rfp_advisor::error::AppError;
use rfp_advisor::telemetry;
use rfp_advisor::workflows::procurement::ProcurementService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let procurement_service = Arc::new(ProcurementService::new(
        Arc::new(InMemoryProcurementRepository::default()),
        Arc::new(LoggingMailer::default()),
        Arc::new(SimulatedOracle),
        default_scoring_config(&config),
    ));

    let app = with_procurement_routes(procurement_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "rfp advisor ready");

    axum::serve(listener, app).await?;
    Ok(())
}

use crate::cli::ServeArgs;
use crate::infra::{
    default_scoring_config, AppState, InMemoryAnalyticsSink, InMemoryLeadRepository,
    InMemoryNotificationPublisher,
};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use leadflow::config::AppConfig;
use leadflow::error::AppError;
use leadflow::telemetry;
use leadflow::workflows::leads::LeadDeskService;
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

    let repository = Arc::new(InMemoryLeadRepository::default());
    let notifier = Arc::new(InMemoryNotificationPublisher::default());
    let sink = Arc::new(InMemoryAnalyticsSink::default());
    let lead_service = Arc::new(LeadDeskService::new(
        repository,
        notifier,
        sink.clone(),
        default_scoring_config(),
    ));

    let app = with_application_routes(lead_service, sink)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lead desk service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

use leadflow::workflows::analytics::{analytics_router, AnalyticsSink};
use leadflow::workflows::leads::{
    lead_router, LeadDeskService, LeadRepository, NotificationPublisher,
};

/// Compose the lead desk and analytics routers with the operational
/// endpoints every deployment carries.
pub(crate) fn with_application_routes<R, N, S>(
    service: Arc<LeadDeskService<R, N, S>>,
    sink: Arc<S>,
) -> axum::Router
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    S: AnalyticsSink + 'static,
{
    lead_router(service)
        .merge(analytics_router(sink))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

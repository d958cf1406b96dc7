use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::events::{AnalyticsEvent, EventCategory};
use super::recorder::AnalyticsSink;
use crate::workflows::leads::domain::LeadId;

/// Router builder exposing the event ingestion and summary endpoints.
pub fn analytics_router<S>(sink: Arc<S>) -> Router
where
    S: AnalyticsSink + 'static,
{
    Router::new()
        .route("/api/v1/analytics/events", post(record_handler::<S>))
        .route("/api/v1/analytics/summary", get(summary_handler::<S>))
        .with_state(sink)
}

/// Wire payload for client-reported events. The server stamps the
/// timestamp so clock-skewed browsers cannot reorder the stream.
#[derive(Debug, Deserialize)]
pub(crate) struct EventRequest {
    pub(crate) event_name: String,
    pub(crate) category: EventCategory,
    #[serde(default)]
    pub(crate) lead_id: Option<String>,
    #[serde(default)]
    pub(crate) page_url: Option<String>,
    #[serde(default)]
    pub(crate) location: Option<String>,
    #[serde(default)]
    pub(crate) session_id: Option<String>,
    #[serde(default)]
    pub(crate) properties: BTreeMap<String, String>,
}

pub(crate) async fn record_handler<S>(
    State(sink): State<Arc<S>>,
    axum::Json(request): axum::Json<EventRequest>,
) -> Response
where
    S: AnalyticsSink + 'static,
{
    let event = AnalyticsEvent {
        event_name: request.event_name,
        category: request.category,
        lead_id: request.lead_id.map(LeadId),
        page_url: request.page_url,
        location: request.location,
        session_id: request.session_id,
        properties: request.properties,
        recorded_at: Utc::now(),
    };

    match sink.record(event) {
        Ok(()) => {
            let payload = json!({ "status": "accepted" });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn summary_handler<S>(State(sink): State<Arc<S>>) -> Response
where
    S: AnalyticsSink + 'static,
{
    match sink.totals() {
        Ok(totals) => {
            let payload = json!({ "events": totals });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

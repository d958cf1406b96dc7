use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{LeadId, LeadStatus, LeadSubmission};
use super::repository::{LeadRepository, NotificationPublisher, RepositoryError};
use super::service::{LeadDeskError, LeadDeskService};
use crate::workflows::analytics::AnalyticsSink;

const DEFAULT_QUEUE_LIMIT: usize = 20;

/// Router builder exposing HTTP endpoints for intake, qualification, and
/// pipeline reporting.
pub fn lead_router<R, N, S>(service: Arc<LeadDeskService<R, N, S>>) -> Router
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    S: AnalyticsSink + 'static,
{
    Router::new()
        .route("/api/v1/leads", post(submit_handler::<R, N, S>))
        .route("/api/v1/leads/score", post(preview_handler::<R, N, S>))
        .route("/api/v1/leads/queue", get(queue_handler::<R, N, S>))
        .route("/api/v1/leads/report", get(report_handler::<R, N, S>))
        .route("/api/v1/leads/:lead_id", get(status_handler::<R, N, S>))
        .route(
            "/api/v1/leads/:lead_id/rescore",
            post(rescore_handler::<R, N, S>),
        )
        .route(
            "/api/v1/leads/:lead_id/status",
            post(update_status_handler::<R, N, S>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N, S>(
    State(service): State<Arc<LeadDeskService<R, N, S>>>,
    axum::Json(submission): axum::Json<LeadSubmission>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    S: AnalyticsSink + 'static,
{
    match service.submit(submission, Utc::now()) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(LeadDeskError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(LeadDeskError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "lead already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn preview_handler<R, N, S>(
    State(service): State<Arc<LeadDeskService<R, N, S>>>,
    axum::Json(submission): axum::Json<LeadSubmission>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    S: AnalyticsSink + 'static,
{
    let score = service.preview(&submission);
    (StatusCode::OK, axum::Json(score)).into_response()
}

pub(crate) async fn status_handler<R, N, S>(
    State(service): State<Arc<LeadDeskService<R, N, S>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    S: AnalyticsSink + 'static,
{
    let id = LeadId(lead_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(LeadDeskError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "lead_id": id.0,
                "status": LeadStatus::New.label(),
                "next_action": "awaiting qualification",
                "total_score": serde_json::Value::Null,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn rescore_handler<R, N, S>(
    State(service): State<Arc<LeadDeskService<R, N, S>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    S: AnalyticsSink + 'static,
{
    let id = LeadId(lead_id);
    match service.rescore(&id, Utc::now()) {
        Ok(score) => {
            let payload = json!({
                "lead_id": id.0,
                "score": score,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(LeadDeskError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "lead not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

/// Body for pipeline transitions.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusRequest {
    pub(crate) status: LeadStatus,
}

pub(crate) async fn update_status_handler<R, N, S>(
    State(service): State<Arc<LeadDeskService<R, N, S>>>,
    Path(lead_id): Path<String>,
    axum::Json(request): axum::Json<StatusRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    S: AnalyticsSink + 'static,
{
    let id = LeadId(lead_id);
    match service.update_status(&id, request.status, Utc::now()) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(LeadDeskError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "lead not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueueParams {
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn queue_handler<R, N, S>(
    State(service): State<Arc<LeadDeskService<R, N, S>>>,
    Query(params): Query<QueueParams>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    S: AnalyticsSink + 'static,
{
    let limit = params.limit.unwrap_or(DEFAULT_QUEUE_LIMIT);
    match service.queue(Utc::now(), limit) {
        Ok(queue) => {
            let payload = json!({ "queue": queue });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn report_handler<R, N, S>(
    State(service): State<Arc<LeadDeskService<R, N, S>>>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    S: AnalyticsSink + 'static,
{
    match service.report() {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

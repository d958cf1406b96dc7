use serde::Serialize;

use super::events::AnalyticsEvent;

/// Sink abstraction for the analytics event stream. Implementations are
/// expected to be cheap; callers on the submission path treat failures
/// as droppable.
pub trait AnalyticsSink: Send + Sync {
    fn record(&self, event: AnalyticsEvent) -> Result<(), SinkError>;
    fn totals(&self) -> Result<Vec<EventCount>, SinkError>;
}

/// Sink transport error.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("analytics sink unavailable: {0}")]
    Unavailable(String),
}

/// Per-event-name tally for the dashboard summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventCount {
    pub event_name: String,
    pub count: usize,
}

//! Fire-and-forget marketing analytics: typed events, a pluggable sink,
//! and the ingestion endpoints the site posts to.

pub mod events;
pub mod recorder;
pub mod router;

pub use events::{scroll_bucket, AnalyticsEvent, ContactChannel, EventCategory};
pub use recorder::{AnalyticsSink, EventCount, SinkError};
pub use router::analytics_router;

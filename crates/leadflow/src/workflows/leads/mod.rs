//! Lead intake, qualification scoring, and pipeline bookkeeping.
//!
//! The scoring rubric is pure and total: every submission yields a score,
//! and unknown or missing fields degrade to their lowest-scoring bucket
//! instead of erroring. Persistence and outbound notifications live
//! behind traits so the service can be exercised in isolation.

pub mod domain;
pub mod import;
pub(crate) mod intake;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    BudgetRange, LeadId, LeadProfile, LeadStatus, LeadSubmission, LeadTimestamps, PriorityBand,
    ProjectTimeline, ServiceCategory,
};
pub use import::{LeadCsvImporter, LeadImportError};
pub use intake::IntakeError;
pub use report::{LeadQueueItem, PipelineSummary};
pub use repository::{
    AlertError, FollowUpAlert, LeadFilter, LeadRecord, LeadRepository, LeadStatusView,
    NotificationPublisher, RepositoryError,
};
pub use router::lead_router;
pub use scoring::{
    priority_band, LeadCategory, LeadScore, ScoreFactor, ScoreFactorKind, ScoringConfig,
    ScoringEngine,
};
pub use service::{LeadDeskError, LeadDeskService};

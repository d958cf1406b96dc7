use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;

use super::domain::{LeadId, LeadStatus, LeadSubmission, LeadTimestamps};
use super::intake::{self, IntakeError};
use super::report::{LeadQueueItem, PipelineSummary};
use super::repository::{
    AlertError, FollowUpAlert, LeadFilter, LeadRecord, LeadRepository, NotificationPublisher,
    RepositoryError,
};
use super::scoring::{priority_band, LeadCategory, LeadScore, ScoringConfig, ScoringEngine};
use crate::workflows::analytics::{AnalyticsEvent, AnalyticsSink};

/// Service composing intake normalization, the scoring engine, and the
/// repository/notification/analytics ports.
pub struct LeadDeskService<R, N, S> {
    repository: Arc<R>,
    notifier: Arc<N>,
    events: Arc<S>,
    engine: Arc<ScoringEngine>,
}

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

impl<R, N, S> LeadDeskService<R, N, S>
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    S: AnalyticsSink + 'static,
{
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        events: Arc<S>,
        config: ScoringConfig,
    ) -> Self {
        Self {
            repository,
            notifier,
            events,
            engine: Arc::new(ScoringEngine::new(config)),
        }
    }

    /// Submit a new lead: normalize, score, persist, log the submission
    /// event, and raise a follow-up alert when the lead lands hot.
    ///
    /// Analytics recording is fire-and-forget: a failing sink is logged
    /// and never blocks the submission.
    pub fn submit(
        &self,
        submission: LeadSubmission,
        now: DateTime<Utc>,
    ) -> Result<LeadRecord, LeadDeskError> {
        let mut profile = intake::profile_from_submission(submission)?;
        profile.lead_id = next_lead_id();

        let score = self.engine.score(&profile);
        let priority = priority_band(score.category, profile.timeline);
        let category = score.category;

        let record = LeadRecord {
            profile,
            status: LeadStatus::New,
            priority,
            score: Some(score),
            timestamps: LeadTimestamps::at(now),
        };

        let stored = self.repository.insert(record)?;

        let event = AnalyticsEvent::lead_submission(&stored, now);
        if let Err(error) = self.events.record(event) {
            warn!(
                lead_id = %stored.profile.lead_id.0,
                %error,
                "dropping lead_submission analytics event"
            );
        }

        if category == LeadCategory::Hot {
            let mut details = BTreeMap::new();
            details.insert("category".to_string(), category.label().to_string());
            if let Some(score) = &stored.score {
                details.insert("total_score".to_string(), score.total_score.to_string());
            }
            self.notifier.publish(FollowUpAlert {
                template: "hot_lead_follow_up".to_string(),
                lead_id: stored.profile.lead_id.clone(),
                details,
            })?;
        }

        Ok(stored)
    }

    /// Fetch a lead and current status for API responses.
    pub fn get(&self, lead_id: &LeadId) -> Result<LeadRecord, LeadDeskError> {
        let record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Recompute the stored score snapshot. Recomputation is the only
    /// path that changes a persisted score.
    pub fn rescore(
        &self,
        lead_id: &LeadId,
        now: DateTime<Utc>,
    ) -> Result<LeadScore, LeadDeskError> {
        let mut record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;

        let score = self.engine.score(&record.profile);
        record.priority = priority_band(score.category, record.profile.timeline);
        record.score = Some(score.clone());
        record.timestamps.updated_at = now;

        self.repository.update(record)?;
        Ok(score)
    }

    /// Advance a lead through the pipeline. Moving into `contacted`
    /// stamps the response-time clock.
    pub fn update_status(
        &self,
        lead_id: &LeadId,
        status: LeadStatus,
        now: DateTime<Utc>,
    ) -> Result<LeadRecord, LeadDeskError> {
        let mut record = self
            .repository
            .fetch(lead_id)?
            .ok_or(RepositoryError::NotFound)?;

        record.status = status;
        if status == LeadStatus::Contacted {
            record.timestamps.last_contacted_at = Some(now);
        }
        record.timestamps.updated_at = now;

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Untouched leads ordered hottest first; ties go to whoever has
    /// waited longest.
    pub fn queue(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<LeadQueueItem>, LeadDeskError> {
        let filter = LeadFilter {
            status: Some(LeadStatus::New),
            ..LeadFilter::default()
        };
        let mut records = self.repository.list(&filter)?;
        records.sort_by(|a, b| {
            let score_a = a.score.as_ref().map(|s| s.total_score).unwrap_or(0);
            let score_b = b.score.as_ref().map(|s| s.total_score).unwrap_or(0);
            score_b
                .cmp(&score_a)
                .then(a.timestamps.created_at.cmp(&b.timestamps.created_at))
        });
        records.truncate(limit);

        Ok(records
            .iter()
            .map(|record| LeadQueueItem::from_record(record, now))
            .collect())
    }

    /// Aggregate pipeline health across the whole book.
    pub fn report(&self) -> Result<PipelineSummary, LeadDeskError> {
        let records = self.repository.list(&LeadFilter::default())?;
        Ok(PipelineSummary::from_records(&records))
    }

    /// Stateless score preview for the on-form display.
    pub fn preview(&self, submission: &LeadSubmission) -> LeadScore {
        self.engine.score_submission(submission)
    }
}

/// Error raised by the lead desk service.
#[derive(Debug, thiserror::Error)]
pub enum LeadDeskError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] AlertError),
}

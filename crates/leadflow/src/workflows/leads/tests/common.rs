use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::analytics::{AnalyticsEvent, AnalyticsSink, EventCount, SinkError};
use crate::workflows::leads::domain::{
    BudgetRange, LeadId, LeadProfile, LeadSubmission, ProjectTimeline, ServiceCategory,
};
use crate::workflows::leads::repository::{
    AlertError, FollowUpAlert, LeadFilter, LeadRecord, LeadRepository, NotificationPublisher,
    RepositoryError,
};
use crate::workflows::leads::scoring::{ScoringConfig, ScoringEngine};
use crate::workflows::leads::{lead_router, LeadDeskService};

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(scoring_config())
}

/// Canonical strong submission: every factor lands its best bucket, for
/// a weighted sum of exactly 90.
pub(super) fn submission() -> LeadSubmission {
    LeadSubmission {
        name: "Lerato Dlamini".to_string(),
        email: "lerato@acme.com".to_string(),
        phone: Some("+27 82 555 0199".to_string()),
        company: Some("Acme Co".to_string()),
        service_type: ServiceCategory::Luxury,
        budget_range: BudgetRange::Over100k,
        timeline: ProjectTimeline::Asap,
        location: Some("johannesburg".to_string()),
        website_url: Some("https://acme.com".to_string()),
        goals: Some("Increase qualified leads by 50%".to_string()),
        source: "website".to_string(),
        utm_source: Some("google".to_string()),
        utm_medium: Some("cpc".to_string()),
        utm_campaign: None,
    }
}

/// Bare-minimum submission: contact details only, everything else in the
/// lowest-scoring bucket. Weighted sum is 6.5.
pub(super) fn empty_submission() -> LeadSubmission {
    LeadSubmission {
        name: "Walk-in Prospect".to_string(),
        email: "prospect@example.com".to_string(),
        ..LeadSubmission::default()
    }
}

/// Profile builder for exercising exact threshold sums.
pub(super) fn profile_with(
    budget: BudgetRange,
    timeline: ProjectTimeline,
    service: ServiceCategory,
    company: bool,
    website: bool,
    clear_goals: bool,
) -> LeadProfile {
    LeadProfile {
        lead_id: LeadId("lead-fixture".to_string()),
        name: "Fixture Lead".to_string(),
        email: "fixture@example.com".to_string(),
        phone: None,
        company: company.then(|| "Fixture Holdings".to_string()),
        service_type: service,
        budget_range: budget,
        timeline,
        location: None,
        website_url: website.then(|| "https://fixture.example".to_string()),
        goals: if clear_goals {
            Some("Grow online bookings across three regions".to_string())
        } else {
            None
        },
        source: "website".to_string(),
        utm_source: None,
        utm_medium: None,
        utm_campaign: None,
        estimated_value: budget.estimated_value(),
    }
}

pub(super) type TestService = LeadDeskService<MemoryRepository, MemoryNotifier, MemorySink>;

pub(super) fn build_service() -> (
    Arc<TestService>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
    Arc<MemorySink>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let sink = Arc::new(MemorySink::default());
    let service = Arc::new(LeadDeskService::new(
        repository.clone(),
        notifier.clone(),
        sink.clone(),
        scoring_config(),
    ));
    (service, repository, notifier, sink)
}

pub(super) fn router_with_service(service: Arc<TestService>) -> axum::Router {
    lead_router(service)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
}

impl LeadRepository for MemoryRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.lead_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile.lead_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.profile.lead_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self, filter: &LeadFilter) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<LeadRecord> = guard
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        if let Some(limit) = filter.limit {
            records.truncate(limit);
        }
        Ok(records)
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    alerts: Arc<Mutex<Vec<FollowUpAlert>>>,
}

impl MemoryNotifier {
    pub(super) fn alerts(&self) -> Vec<FollowUpAlert> {
        self.alerts.lock().expect("alert mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifier {
    fn publish(&self, alert: FollowUpAlert) -> Result<(), AlertError> {
        self.alerts
            .lock()
            .expect("alert mutex poisoned")
            .push(alert);
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySink {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl MemorySink {
    pub(super) fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().expect("sink mutex poisoned").clone()
    }
}

impl AnalyticsSink for MemorySink {
    fn record(&self, event: AnalyticsEvent) -> Result<(), SinkError> {
        self.events.lock().expect("sink mutex poisoned").push(event);
        Ok(())
    }

    fn totals(&self) -> Result<Vec<EventCount>, SinkError> {
        let guard = self.events.lock().expect("sink mutex poisoned");
        let mut counts: Vec<EventCount> = Vec::new();
        for event in guard.iter() {
            match counts
                .iter_mut()
                .find(|count| count.event_name == event.event_name)
            {
                Some(count) => count.count += 1,
                None => counts.push(EventCount {
                    event_name: event.event_name.clone(),
                    count: 1,
                }),
            }
        }
        Ok(counts)
    }
}

/// Sink that always fails, for asserting fire-and-forget semantics.
pub(super) struct FailingSink;

impl AnalyticsSink for FailingSink {
    fn record(&self, _event: AnalyticsEvent) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("event store offline".to_string()))
    }

    fn totals(&self) -> Result<Vec<EventCount>, SinkError> {
        Err(SinkError::Unavailable("event store offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl LeadRepository for ConflictRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Ok(None)
    }

    fn list(&self, _filter: &LeadFilter) -> Result<Vec<LeadRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _filter: &LeadFilter) -> Result<Vec<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

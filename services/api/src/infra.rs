use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use leadflow::workflows::analytics::{AnalyticsEvent, AnalyticsSink, EventCount, SinkError};
use leadflow::workflows::leads::{
    AlertError, FollowUpAlert, LeadFilter, LeadId, LeadRecord, LeadRepository,
    NotificationPublisher, RepositoryError, ScoringConfig,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    records: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
}

impl LeadRepository for InMemoryLeadRepository {
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
        if guard.contains_key(&record.profile.lead_id) {
            guard.insert(record.profile.lead_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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
pub(crate) struct InMemoryNotificationPublisher {
    alerts: Arc<Mutex<Vec<FollowUpAlert>>>,
}

impl NotificationPublisher for InMemoryNotificationPublisher {
    fn publish(&self, alert: FollowUpAlert) -> Result<(), AlertError> {
        let mut guard = self.alerts.lock().expect("alert mutex poisoned");
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryNotificationPublisher {
    pub(crate) fn alerts(&self) -> Vec<FollowUpAlert> {
        self.alerts.lock().expect("alert mutex poisoned").clone()
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAnalyticsSink {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl AnalyticsSink for InMemoryAnalyticsSink {
    fn record(&self, event: AnalyticsEvent) -> Result<(), SinkError> {
        let mut guard = self.events.lock().expect("sink mutex poisoned");
        guard.push(event);
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

pub(crate) fn default_scoring_config() -> ScoringConfig {
    ScoringConfig {
        hot_threshold: 70,
        warm_threshold: 40,
        clear_goals_min_chars: 10,
    }
}

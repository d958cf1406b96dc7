//! Integration coverage for the lead intake, qualification, and pipeline
//! workflow, driven end-to-end through the public service facade and
//! HTTP router.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use leadflow::workflows::analytics::{AnalyticsEvent, AnalyticsSink, EventCount, SinkError};
    use leadflow::workflows::leads::{
        AlertError, BudgetRange, FollowUpAlert, LeadDeskService, LeadFilter, LeadId, LeadRecord,
        LeadRepository, LeadSubmission, NotificationPublisher, ProjectTimeline, RepositoryError,
        ScoringConfig, ServiceCategory,
    };

    pub fn strong_submission() -> LeadSubmission {
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
            utm_source: None,
            utm_medium: None,
            utm_campaign: None,
        }
    }

    pub fn sparse_submission() -> LeadSubmission {
        LeadSubmission {
            name: "Walk-in Prospect".to_string(),
            email: "prospect@example.com".to_string(),
            ..LeadSubmission::default()
        }
    }

    #[derive(Default, Clone)]
    pub struct MemoryRepository {
        records: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
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
    pub struct MemoryNotifier {
        alerts: Arc<Mutex<Vec<FollowUpAlert>>>,
    }

    impl MemoryNotifier {
        pub fn alerts(&self) -> Vec<FollowUpAlert> {
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
    pub struct MemorySink {
        events: Arc<Mutex<Vec<AnalyticsEvent>>>,
    }

    impl MemorySink {
        pub fn events(&self) -> Vec<AnalyticsEvent> {
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

    pub type TestService = LeadDeskService<MemoryRepository, MemoryNotifier, MemorySink>;

    pub fn build_service() -> (
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
            ScoringConfig::default(),
        ));
        (service, repository, notifier, sink)
    }
}

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use common::*;
use leadflow::workflows::leads::{lead_router, LeadStatus};
use tower::ServiceExt;

async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[test]
fn qualification_flow_scores_alerts_and_reports() {
    let (service, _, notifier, sink) = build_service();
    let now = Utc.with_ymd_and_hms(2025, 11, 3, 9, 0, 0).unwrap();

    let hot = service
        .submit(strong_submission(), now)
        .expect("hot lead stored");
    let cold = service
        .submit(sparse_submission(), now + Duration::hours(1))
        .expect("cold lead stored");

    let hot_score = hot.score.as_ref().expect("score stored");
    assert_eq!(hot_score.total_score, 90);
    assert_eq!(hot_score.priority, 10);

    let cold_score = cold.score.as_ref().expect("score stored");
    assert_eq!(cold_score.total_score, 7);
    assert_eq!(cold_score.priority, 2);

    let alerts = notifier.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].lead_id, hot.profile.lead_id);

    assert_eq!(sink.events().len(), 2);

    let queue = service.queue(now + Duration::hours(2), 10).expect("queue");
    assert_eq!(queue.len(), 2);
    assert_eq!(queue[0].lead_id, hot.profile.lead_id);
    assert_eq!(queue[0].hours_since_created, 2);

    service
        .update_status(&cold.profile.lead_id, LeadStatus::ClosedLost, now)
        .expect("status updated");

    let summary = service.report().expect("report builds");
    assert_eq!(summary.total_leads, 2);
    assert_eq!(summary.open_leads, 1);
    assert_eq!(summary.pipeline_value, 150_000);
}

#[test]
fn rescoring_is_stable_for_unchanged_profiles() {
    let (service, _, _, _) = build_service();
    let now = Utc.with_ymd_and_hms(2025, 11, 3, 9, 0, 0).unwrap();

    let record = service
        .submit(strong_submission(), now)
        .expect("lead stored");
    let original = record.score.clone().expect("score stored");

    let rescored = service
        .rescore(&record.profile.lead_id, now + Duration::days(1))
        .expect("rescore succeeds");

    assert_eq!(rescored, original);
}

#[tokio::test]
async fn http_surface_covers_intake_preview_and_reporting() {
    let (service, _, _, _) = build_service();
    let router = lead_router(service);

    let preview = router
        .clone()
        .oneshot(
            axum::http::Request::post("/api/v1/leads/score")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&strong_submission()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("router responds");
    assert_eq!(preview.status(), StatusCode::OK);
    let preview_body = read_json(preview).await;
    assert_eq!(preview_body["total_score"], 90);

    let submit = router
        .clone()
        .oneshot(
            axum::http::Request::post("/api/v1/leads")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&strong_submission()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("router responds");
    assert_eq!(submit.status(), StatusCode::ACCEPTED);
    let submit_body = read_json(submit).await;
    let lead_id = submit_body["lead_id"].as_str().expect("lead id").to_string();

    let fetched = router
        .clone()
        .oneshot(
            axum::http::Request::get(format!("/api/v1/leads/{lead_id}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("router responds");
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched_body = read_json(fetched).await;
    assert_eq!(fetched_body["category"], "hot");

    let report = router
        .oneshot(
            axum::http::Request::get("/api/v1/leads/report")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("router responds");
    assert_eq!(report.status(), StatusCode::OK);
    let report_body = read_json(report).await;
    assert_eq!(report_body["total_leads"], 1);
}

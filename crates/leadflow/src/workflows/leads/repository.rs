use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{LeadId, LeadProfile, LeadStatus, LeadTimestamps, PriorityBand};
use super::scoring::{LeadCategory, LeadScore};

/// Repository record containing the profile, score snapshot, and CRM
/// bookkeeping. The stored score is a cache; rescoring is the only way
/// it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRecord {
    pub profile: LeadProfile,
    pub status: LeadStatus,
    pub priority: PriorityBand,
    pub score: Option<LeadScore>,
    pub timestamps: LeadTimestamps,
}

impl LeadRecord {
    pub fn category(&self) -> Option<LeadCategory> {
        self.score.as_ref().map(|score| score.category)
    }

    /// First action from the category playbook, or a holding line while
    /// the lead awaits qualification.
    pub fn next_action(&self) -> String {
        self.score
            .as_ref()
            .and_then(|score| score.recommendations.first().cloned())
            .unwrap_or_else(|| "awaiting qualification".to_string())
    }

    pub fn status_view(&self) -> LeadStatusView {
        LeadStatusView {
            lead_id: self.profile.lead_id.clone(),
            status: self.status.label(),
            priority: self.priority.label(),
            next_action: self.next_action(),
            total_score: self.score.as_ref().map(|score| score.total_score),
            category: self.category().map(LeadCategory::label),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn update(&self, record: LeadRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError>;
    fn list(&self, filter: &LeadFilter) -> Result<Vec<LeadRecord>, RepositoryError>;
}

/// Filter applied by [`LeadRepository::list`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadFilter {
    #[serde(default)]
    pub status: Option<LeadStatus>,
    #[serde(default)]
    pub category: Option<LeadCategory>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl LeadFilter {
    pub fn matches(&self, record: &LeadRecord) -> bool {
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        if let Some(category) = self.category {
            if record.category() != Some(category) {
                return false;
            }
        }
        true
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound follow-up hooks (e.g., the notification
/// dropdown feed or an e-mail adapter).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, alert: FollowUpAlert) -> Result<(), AlertError>;
}

/// Follow-up payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpAlert {
    pub template: String,
    pub lead_id: LeadId,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a lead's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct LeadStatusView {
    pub lead_id: LeadId,
    pub status: &'static str,
    pub priority: &'static str,
    pub next_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
}

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{LeadId, LeadStatus};
use super::repository::LeadRecord;
use super::scoring::LeadCategory;

/// Aggregate pipeline health across every stored lead, the numbers the
/// CEO dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub total_leads: usize,
    pub open_leads: usize,
    pub converted_leads: usize,
    /// Percentage of all leads that closed won; 0 when the book is empty.
    pub conversion_rate: f32,
    pub hot_leads: usize,
    pub warm_leads: usize,
    pub cold_leads: usize,
    /// Sum of estimated deal values across open leads.
    pub pipeline_value: u64,
    pub average_score: f32,
}

impl PipelineSummary {
    pub fn from_records(records: &[LeadRecord]) -> Self {
        let total_leads = records.len();
        let mut open_leads = 0;
        let mut converted_leads = 0;
        let mut hot_leads = 0;
        let mut warm_leads = 0;
        let mut cold_leads = 0;
        let mut pipeline_value: u64 = 0;
        let mut score_sum: u64 = 0;
        let mut scored = 0;

        for record in records {
            if record.status.is_open() {
                open_leads += 1;
                pipeline_value += u64::from(record.profile.estimated_value.unwrap_or(0));
            }
            if record.status == LeadStatus::ClosedWon {
                converted_leads += 1;
            }
            match record.category() {
                Some(LeadCategory::Hot) => hot_leads += 1,
                Some(LeadCategory::Warm) => warm_leads += 1,
                Some(LeadCategory::Cold) => cold_leads += 1,
                None => {}
            }
            if let Some(score) = &record.score {
                score_sum += u64::from(score.total_score);
                scored += 1;
            }
        }

        let conversion_rate = if total_leads == 0 {
            0.0
        } else {
            converted_leads as f32 / total_leads as f32 * 100.0
        };
        let average_score = if scored == 0 {
            0.0
        } else {
            score_sum as f32 / scored as f32
        };

        Self {
            total_leads,
            open_leads,
            converted_leads,
            conversion_rate,
            hot_leads,
            warm_leads,
            cold_leads,
            pipeline_value,
            average_score,
        }
    }
}

/// Queue entry for the response-time view: who has been waiting, and for
/// how long.
#[derive(Debug, Clone, Serialize)]
pub struct LeadQueueItem {
    pub lead_id: LeadId,
    pub name: String,
    pub status: &'static str,
    pub priority: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    pub hours_since_created: i64,
    pub next_action: String,
}

impl LeadQueueItem {
    pub fn from_record(record: &LeadRecord, now: DateTime<Utc>) -> Self {
        Self {
            lead_id: record.profile.lead_id.clone(),
            name: record.profile.name.clone(),
            status: record.status.label(),
            priority: record.priority.label(),
            total_score: record.score.as_ref().map(|score| score.total_score),
            category: record.category().map(LeadCategory::label),
            hours_since_created: (now - record.timestamps.created_at).num_hours(),
            next_action: record.next_action(),
        }
    }
}

use super::config::ScoringConfig;
use crate::workflows::leads::domain::{PriorityBand, ProjectTimeline};
use serde::{Deserialize, Serialize};

/// Temperature bucket the follow-up playbook is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadCategory {
    Hot,
    Warm,
    Cold,
}

impl LeadCategory {
    pub const fn label(self) -> &'static str {
        match self {
            LeadCategory::Hot => "hot",
            LeadCategory::Warm => "warm",
            LeadCategory::Cold => "cold",
        }
    }
}

/// Thresholds compare against the unrounded weighted sum, so a sum of
/// 69.6 reports a rounded total of 70 yet stays warm.
pub(crate) fn categorize(weighted_sum: f64, config: &ScoringConfig) -> LeadCategory {
    if weighted_sum >= f64::from(config.hot_threshold) {
        LeadCategory::Hot
    } else if weighted_sum >= f64::from(config.warm_threshold) {
        LeadCategory::Warm
    } else {
        LeadCategory::Cold
    }
}

/// Follow-up priority on a 1-10 scale, derived from the unrounded sum.
/// A perfect 100-point sum evaluates to 11; the formula is kept as-is
/// rather than clamped.
pub(crate) fn priority_level(weighted_sum: f64) -> u8 {
    (weighted_sum / 10.0 + 1.0).round() as u8
}

const HOT_PLAYBOOK: [&str; 4] = [
    "Respond as soon as possible",
    "Schedule a call immediately",
    "Prepare detailed proposal",
    "Offer priority timeline",
];

const WARM_PLAYBOOK: [&str; 4] = [
    "Respond as soon as possible",
    "Send case studies",
    "Schedule discovery call",
    "Nurture with valuable content",
];

const COLD_PLAYBOOK: [&str; 4] = [
    "Respond as soon as possible",
    "Qualify further via email",
    "Add to nurture sequence",
    "Focus on education over sales",
];

/// Fixed, ordered action list per category. Not derived from individual
/// factors.
pub(crate) fn recommendations(category: LeadCategory) -> Vec<String> {
    let playbook = match category {
        LeadCategory::Hot => HOT_PLAYBOOK,
        LeadCategory::Warm => WARM_PLAYBOOK,
        LeadCategory::Cold => COLD_PLAYBOOK,
    };
    playbook.iter().map(|action| action.to_string()).collect()
}

/// CRM priority band shown in the queue. Hot leads in a hurry escalate
/// to urgent.
pub fn priority_band(category: LeadCategory, timeline: ProjectTimeline) -> PriorityBand {
    match category {
        LeadCategory::Hot if matches!(timeline, ProjectTimeline::Asap) => PriorityBand::Urgent,
        LeadCategory::Hot => PriorityBand::High,
        LeadCategory::Warm => PriorityBand::Medium,
        LeadCategory::Cold => PriorityBand::Low,
    }
}

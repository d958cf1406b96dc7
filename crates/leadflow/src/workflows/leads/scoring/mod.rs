mod config;
pub(crate) mod rules;
pub(crate) mod triage;

pub use config::ScoringConfig;
pub use triage::{priority_band, LeadCategory};

use crate::workflows::leads::domain::{LeadProfile, LeadSubmission};
use rules::FactorInputs;
use serde::{Deserialize, Serialize};

/// Stateless scorer applying the qualification rubric to a lead.
///
/// Scoring is pure and total: every input yields a score, and unknown or
/// missing fields fall back to their lowest-scoring bucket instead of
/// erroring.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a normalized lead profile.
    pub fn score(&self, profile: &LeadProfile) -> LeadScore {
        self.score_inputs(FactorInputs::from_profile(profile))
    }

    /// Score a raw submission without persisting anything. Backs the
    /// on-form preview shown while a prospect fills out the intake form.
    pub fn score_submission(&self, submission: &LeadSubmission) -> LeadScore {
        self.score_inputs(FactorInputs::from_submission(submission))
    }

    fn score_inputs(&self, inputs: FactorInputs<'_>) -> LeadScore {
        let (factors, weighted_sum) = rules::score_factors(&inputs, &self.config);
        let category = triage::categorize(weighted_sum, &self.config);

        LeadScore {
            total_score: weighted_sum.round() as u8,
            category,
            factors,
            priority: triage::priority_level(weighted_sum),
            recommendations: triage::recommendations(category),
        }
    }
}

/// Factors the rubric weighs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactorKind {
    BudgetRange,
    TimelineUrgency,
    ServiceType,
    CompanyInfo,
    WebsitePresence,
    GoalsClarity,
}

impl ScoreFactorKind {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreFactorKind::BudgetRange => "Budget Range",
            ScoreFactorKind::TimelineUrgency => "Timeline Urgency",
            ScoreFactorKind::ServiceType => "Service Type",
            ScoreFactorKind::CompanyInfo => "Company Information",
            ScoreFactorKind::WebsitePresence => "Current Website",
            ScoreFactorKind::GoalsClarity => "Goals Clarity",
        }
    }
}

/// Discrete contribution to a lead score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub factor: ScoreFactorKind,
    pub raw_score: u8,
    pub weight: u8,
    pub rationale: String,
}

/// Full qualification verdict for a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScore {
    pub total_score: u8,
    pub category: LeadCategory,
    pub factors: Vec<ScoreFactor>,
    pub priority: u8,
    pub recommendations: Vec<String>,
}

use super::config::ScoringConfig;
use super::{ScoreFactor, ScoreFactorKind};
use crate::workflows::leads::domain::{
    BudgetRange, LeadProfile, LeadSubmission, ProjectTimeline, ServiceCategory,
};

pub(crate) const BUDGET_WEIGHT: u8 = 40;
pub(crate) const TIMELINE_WEIGHT: u8 = 25;
pub(crate) const SERVICE_WEIGHT: u8 = 15;
pub(crate) const COMPANY_WEIGHT: u8 = 10;
pub(crate) const WEBSITE_WEIGHT: u8 = 5;
pub(crate) const GOALS_WEIGHT: u8 = 5;

/// The six signals the rubric consumes, borrowed from either a raw
/// submission or a normalized profile.
pub(crate) struct FactorInputs<'a> {
    pub(crate) budget_range: BudgetRange,
    pub(crate) timeline: ProjectTimeline,
    pub(crate) service_type: ServiceCategory,
    pub(crate) company: Option<&'a str>,
    pub(crate) website_url: Option<&'a str>,
    pub(crate) goals: Option<&'a str>,
}

impl<'a> FactorInputs<'a> {
    pub(crate) fn from_submission(submission: &'a LeadSubmission) -> Self {
        Self {
            budget_range: submission.budget_range,
            timeline: submission.timeline,
            service_type: submission.service_type,
            company: submission.company.as_deref(),
            website_url: submission.website_url.as_deref(),
            goals: submission.goals.as_deref(),
        }
    }

    pub(crate) fn from_profile(profile: &'a LeadProfile) -> Self {
        Self {
            budget_range: profile.budget_range,
            timeline: profile.timeline,
            service_type: profile.service_type,
            company: profile.company.as_deref(),
            website_url: profile.website_url.as_deref(),
            goals: profile.goals.as_deref(),
        }
    }
}

pub(crate) const fn budget_raw_score(budget: BudgetRange) -> u8 {
    match budget {
        BudgetRange::Over100k => 100,
        BudgetRange::From50kTo100k => 80,
        BudgetRange::From25kTo50k => 60,
        BudgetRange::From10kTo25k => 40,
        BudgetRange::Under10k => 20,
        BudgetRange::Unspecified => 0,
    }
}

pub(crate) const fn timeline_raw_score(timeline: ProjectTimeline) -> u8 {
    match timeline {
        ProjectTimeline::Asap => 90,
        ProjectTimeline::OneMonth => 80,
        ProjectTimeline::TwoMonths => 60,
        ProjectTimeline::ThreeMonths => 40,
        ProjectTimeline::Flexible => 20,
        ProjectTimeline::Unspecified => 0,
    }
}

pub(crate) const fn service_raw_score(service: ServiceCategory) -> u8 {
    match service {
        ServiceCategory::Luxury => 90,
        ServiceCategory::LawFirm => 85,
        ServiceCategory::Consulting => 80,
        ServiceCategory::Financial => 75,
        ServiceCategory::RealEstate => 70,
        ServiceCategory::Ecommerce => 65,
        ServiceCategory::Other => 50,
        ServiceCategory::Unspecified => 0,
    }
}

fn has_text(value: Option<&str>) -> bool {
    value.map(str::trim).is_some_and(|text| !text.is_empty())
}

/// Apply the full rubric, returning the six factor entries in display
/// order alongside the unrounded weighted sum.
pub(crate) fn score_factors(
    inputs: &FactorInputs<'_>,
    config: &ScoringConfig,
) -> (Vec<ScoreFactor>, f64) {
    let mut factors = Vec::with_capacity(6);
    let mut weighted_sum = 0.0_f64;

    let mut push = |factors: &mut Vec<ScoreFactor>,
                    factor: ScoreFactorKind,
                    raw_score: u8,
                    weight: u8,
                    rationale: String| {
        weighted_sum += f64::from(raw_score) * f64::from(weight) / 100.0;
        factors.push(ScoreFactor {
            factor,
            raw_score,
            weight,
            rationale,
        });
    };

    let budget_score = budget_raw_score(inputs.budget_range);
    let purchasing_power = if budget_score > 60 {
        "high"
    } else if budget_score > 30 {
        "medium"
    } else {
        "low"
    };
    push(
        &mut factors,
        ScoreFactorKind::BudgetRange,
        budget_score,
        BUDGET_WEIGHT,
        format!(
            "budget of {} indicates {} purchasing power",
            inputs.budget_range.tag(),
            purchasing_power
        ),
    );

    let timeline_score = timeline_raw_score(inputs.timeline);
    let urgency = if timeline_score > 60 {
        "high"
    } else if timeline_score > 30 {
        "medium"
    } else {
        "low"
    };
    push(
        &mut factors,
        ScoreFactorKind::TimelineUrgency,
        timeline_score,
        TIMELINE_WEIGHT,
        format!(
            "timeline of {} shows {} urgency",
            inputs.timeline.tag(),
            urgency
        ),
    );

    let service_score = service_raw_score(inputs.service_type);
    let service_value = if service_score > 70 {
        "high-value"
    } else if service_score > 50 {
        "medium-value"
    } else {
        "lower-value"
    };
    push(
        &mut factors,
        ScoreFactorKind::ServiceType,
        service_score,
        SERVICE_WEIGHT,
        format!(
            "{} is a {} engagement",
            inputs.service_type.tag(),
            service_value
        ),
    );

    let has_company = has_text(inputs.company);
    push(
        &mut factors,
        ScoreFactorKind::CompanyInfo,
        if has_company { 70 } else { 30 },
        COMPANY_WEIGHT,
        if has_company {
            "company name provided indicates B2B intent".to_string()
        } else {
            "no company info, likely an individual buyer".to_string()
        },
    );

    let has_website = has_text(inputs.website_url);
    push(
        &mut factors,
        ScoreFactorKind::WebsitePresence,
        if has_website { 60 } else { 40 },
        WEBSITE_WEIGHT,
        if has_website {
            "existing website on record, upgrade potential".to_string()
        } else {
            "no current website, new build opportunity".to_string()
        },
    );

    let clear_goals = inputs
        .goals
        .map(str::trim)
        .is_some_and(|text| text.chars().count() > config.clear_goals_min_chars);
    push(
        &mut factors,
        ScoreFactorKind::GoalsClarity,
        if clear_goals { 80 } else { 30 },
        GOALS_WEIGHT,
        if clear_goals {
            "clear goals provided, serious inquiry".to_string()
        } else {
            "vague goals, needs qualification".to_string()
        },
    );

    (factors, weighted_sum)
}

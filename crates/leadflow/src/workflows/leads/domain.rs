use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// Budget band the prospect selected on the intake form.
///
/// Deserialization is deliberately permissive: any tag outside the known
/// bands collapses to [`BudgetRange::Unspecified`], which contributes
/// nothing to the qualification score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum BudgetRange {
    #[serde(rename = "under-10k")]
    Under10k,
    #[serde(rename = "10k-25k")]
    From10kTo25k,
    #[serde(rename = "25k-50k")]
    From25kTo50k,
    #[serde(rename = "50k-100k")]
    From50kTo100k,
    #[serde(rename = "over-100k")]
    Over100k,
    #[default]
    #[serde(rename = "unspecified")]
    Unspecified,
}

impl BudgetRange {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "under-10k" => Self::Under10k,
            "10k-25k" => Self::From10kTo25k,
            "25k-50k" => Self::From25kTo50k,
            "50k-100k" => Self::From50kTo100k,
            "over-100k" => Self::Over100k,
            _ => Self::Unspecified,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Under10k => "under-10k",
            Self::From10kTo25k => "10k-25k",
            Self::From25kTo50k => "25k-50k",
            Self::From50kTo100k => "50k-100k",
            Self::Over100k => "over-100k",
            Self::Unspecified => "unspecified",
        }
    }

    /// Midpoint deal value used for pipeline totals and conversion
    /// tracking, in the account currency.
    pub const fn estimated_value(self) -> Option<u32> {
        match self {
            Self::Under10k => Some(5_000),
            Self::From10kTo25k => Some(17_500),
            Self::From25kTo50k => Some(37_500),
            Self::From50kTo100k => Some(75_000),
            Self::Over100k => Some(150_000),
            Self::Unspecified => None,
        }
    }
}

impl From<String> for BudgetRange {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

/// Desired delivery window declared at intake. Unknown tags collapse to
/// [`ProjectTimeline::Unspecified`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ProjectTimeline {
    #[serde(rename = "asap")]
    Asap,
    #[serde(rename = "1-month")]
    OneMonth,
    #[serde(rename = "2-months")]
    TwoMonths,
    #[serde(rename = "3-months")]
    ThreeMonths,
    #[serde(rename = "flexible")]
    Flexible,
    #[default]
    #[serde(rename = "unspecified")]
    Unspecified,
}

impl ProjectTimeline {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "asap" => Self::Asap,
            "1-month" => Self::OneMonth,
            "2-months" => Self::TwoMonths,
            "3-months" => Self::ThreeMonths,
            "flexible" => Self::Flexible,
            _ => Self::Unspecified,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::Asap => "asap",
            Self::OneMonth => "1-month",
            Self::TwoMonths => "2-months",
            Self::ThreeMonths => "3-months",
            Self::Flexible => "flexible",
            Self::Unspecified => "unspecified",
        }
    }
}

impl From<String> for ProjectTimeline {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

/// Service vertical requested by the prospect.
///
/// `Other` is a recognized catch-all the form offers and still carries
/// points; an unknown tag is `Unspecified` and scores zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ServiceCategory {
    #[serde(rename = "law-firm")]
    LawFirm,
    #[serde(rename = "consulting")]
    Consulting,
    #[serde(rename = "financial")]
    Financial,
    #[serde(rename = "luxury")]
    Luxury,
    #[serde(rename = "real-estate")]
    RealEstate,
    #[serde(rename = "ecommerce")]
    Ecommerce,
    #[serde(rename = "other")]
    Other,
    #[default]
    #[serde(rename = "unspecified")]
    Unspecified,
}

impl ServiceCategory {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "law-firm" => Self::LawFirm,
            "consulting" => Self::Consulting,
            "financial" => Self::Financial,
            "luxury" => Self::Luxury,
            "real-estate" => Self::RealEstate,
            "ecommerce" => Self::Ecommerce,
            "other" => Self::Other,
            _ => Self::Unspecified,
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            Self::LawFirm => "law-firm",
            Self::Consulting => "consulting",
            Self::Financial => "financial",
            Self::Luxury => "luxury",
            Self::RealEstate => "real-estate",
            Self::Ecommerce => "ecommerce",
            Self::Other => "other",
            Self::Unspecified => "unspecified",
        }
    }
}

impl From<String> for ServiceCategory {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

/// Raw intake form payload as submitted by the marketing site.
///
/// Only name and email are hard requirements; every other field degrades
/// gracefully so a sparse submission still scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub service_type: ServiceCategory,
    #[serde(default)]
    pub budget_range: BudgetRange,
    #[serde(default)]
    pub timeline: ProjectTimeline,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub goals: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default)]
    pub utm_source: Option<String>,
    #[serde(default)]
    pub utm_medium: Option<String>,
    #[serde(default)]
    pub utm_campaign: Option<String>,
}

fn default_source() -> String {
    "website".to_string()
}

/// Normalized lead after intake validation, ready for scoring and storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadProfile {
    pub lead_id: LeadId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service_type: ServiceCategory,
    pub budget_range: BudgetRange,
    pub timeline: ProjectTimeline,
    pub location: Option<String>,
    pub website_url: Option<String>,
    pub goals: Option<String>,
    pub source: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub estimated_value: Option<u32>,
}

/// High level status tracked throughout the lead pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    ProposalSent,
    Negotiating,
    ClosedWon,
    ClosedLost,
    Nurturing,
}

impl LeadStatus {
    pub const fn label(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::ProposalSent => "proposal_sent",
            LeadStatus::Negotiating => "negotiating",
            LeadStatus::ClosedWon => "closed_won",
            LeadStatus::ClosedLost => "closed_lost",
            LeadStatus::Nurturing => "nurturing",
        }
    }

    pub const fn is_open(self) -> bool {
        !matches!(self, LeadStatus::ClosedWon | LeadStatus::ClosedLost)
    }
}

/// Follow-up priority band surfaced in the CRM queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityBand {
    Low,
    Medium,
    High,
    Urgent,
}

impl PriorityBand {
    pub const fn label(self) -> &'static str {
        match self {
            PriorityBand::Low => "low",
            PriorityBand::Medium => "medium",
            PriorityBand::High => "high",
            PriorityBand::Urgent => "urgent",
        }
    }
}

/// Timestamps every stored lead carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadTimestamps {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contacted_at: Option<DateTime<Utc>>,
}

impl LeadTimestamps {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            last_contacted_at: None,
        }
    }
}

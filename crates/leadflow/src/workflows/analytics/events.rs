use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::leads::domain::LeadId;
use crate::workflows::leads::repository::LeadRecord;

/// Reporting bucket an event rolls up under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Engagement,
    LeadGeneration,
    Contact,
    Conversion,
    LocationTargeting,
}

impl EventCategory {
    pub const fn label(self) -> &'static str {
        match self {
            EventCategory::Engagement => "engagement",
            EventCategory::LeadGeneration => "lead_generation",
            EventCategory::Contact => "contact",
            EventCategory::Conversion => "conversion",
            EventCategory::LocationTargeting => "location_targeting",
        }
    }
}

/// Channels a prospect can reach out on from the marketing site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactChannel {
    Whatsapp,
    Phone,
    Email,
}

impl ContactChannel {
    pub const fn event_name(self) -> &'static str {
        match self {
            ContactChannel::Whatsapp => "whatsapp_click",
            ContactChannel::Phone => "phone_click",
            ContactChannel::Email => "email_click",
        }
    }
}

/// Scroll depth thresholds worth recording. Intermediate percentages are
/// dropped so a single page view logs at most four depth events.
const SCROLL_DEPTH_MARKS: [u8; 4] = [25, 50, 75, 90];

pub fn scroll_bucket(percent: u8) -> Option<u8> {
    SCROLL_DEPTH_MARKS
        .iter()
        .copied()
        .find(|mark| *mark == percent)
}

/// A single marketing/engagement event headed for the analytics store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub event_name: String,
    pub category: EventCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<LeadId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    pub recorded_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    fn base(event_name: &str, category: EventCategory, recorded_at: DateTime<Utc>) -> Self {
        Self {
            event_name: event_name.to_string(),
            category,
            lead_id: None,
            page_url: None,
            location: None,
            session_id: None,
            properties: BTreeMap::new(),
            recorded_at,
        }
    }

    /// Conversion-tracking event emitted when a lead record is stored.
    /// Carries the budget band's deal value (0 when unspecified).
    pub fn lead_submission(record: &LeadRecord, recorded_at: DateTime<Utc>) -> Self {
        let profile = &record.profile;
        let mut event = Self::base("lead_submission", EventCategory::LeadGeneration, recorded_at);
        event.lead_id = Some(profile.lead_id.clone());
        event.location = profile.location.clone();
        event
            .properties
            .insert("service_type".to_string(), profile.service_type.tag().to_string());
        event
            .properties
            .insert("budget_range".to_string(), profile.budget_range.tag().to_string());
        event
            .properties
            .insert("lead_source".to_string(), profile.source.clone());
        event.properties.insert(
            "value".to_string(),
            profile.estimated_value.unwrap_or(0).to_string(),
        );
        event
    }

    pub fn form_start(form_type: &str, location: &str, recorded_at: DateTime<Utc>) -> Self {
        let mut event = Self::base("form_start", EventCategory::LeadGeneration, recorded_at);
        event.location = Some(location.to_string());
        event
            .properties
            .insert("form_type".to_string(), form_type.to_string());
        event
    }

    pub fn form_abandon(
        form_type: &str,
        location: &str,
        step: &str,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        let mut event = Self::base("form_abandon", EventCategory::LeadGeneration, recorded_at);
        event.location = Some(location.to_string());
        event
            .properties
            .insert("form_type".to_string(), form_type.to_string());
        event
            .properties
            .insert("form_step".to_string(), step.to_string());
        event
    }

    pub fn contact_click(
        channel: ContactChannel,
        location: &str,
        service_type: Option<&str>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        let mut event = Self::base(channel.event_name(), EventCategory::Contact, recorded_at);
        event.location = Some(location.to_string());
        event.properties.insert(
            "service_type".to_string(),
            service_type.unwrap_or("general").to_string(),
        );
        event
    }

    pub fn service_view(service_type: &str, location: &str, recorded_at: DateTime<Utc>) -> Self {
        let mut event = Self::base("service_view", EventCategory::Engagement, recorded_at);
        event.location = Some(location.to_string());
        event
            .properties
            .insert("service_type".to_string(), service_type.to_string());
        event
    }

    pub fn location_page_view(
        location: &str,
        province: &str,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        let mut event = Self::base(
            "location_page_view",
            EventCategory::LocationTargeting,
            recorded_at,
        );
        event.location = Some(location.to_string());
        event
            .properties
            .insert("province".to_string(), province.to_string());
        event
    }

    /// Scroll engagement, recorded only at the 25/50/75/90% marks.
    pub fn scroll_depth(percent: u8, location: &str, recorded_at: DateTime<Utc>) -> Option<Self> {
        let mark = scroll_bucket(percent)?;
        let mut event = Self::base("scroll_depth", EventCategory::Engagement, recorded_at);
        event.location = Some(location.to_string());
        event
            .properties
            .insert("depth_percent".to_string(), mark.to_string());
        Some(event)
    }

    pub fn conversion(
        conversion_type: &str,
        properties: BTreeMap<String, String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        let mut event = Self::base("conversion", EventCategory::Conversion, recorded_at);
        event.properties = properties;
        event
            .properties
            .insert("conversion_type".to_string(), conversion_type.to_string());
        event
    }
}

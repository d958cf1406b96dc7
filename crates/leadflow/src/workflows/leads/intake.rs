use super::domain::{LeadId, LeadProfile, LeadSubmission};

/// Validation errors raised while normalizing an intake submission.
///
/// Deliberately small: the scorer tolerates anything, so intake only
/// enforces the two columns the CRM cannot store a lead without.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("lead submission requires a contact name")]
    MissingName,
    #[error("lead submission requires a contact email")]
    MissingEmail,
    #[error("contact email '{0}' is not deliverable")]
    InvalidEmail(String),
}

/// Convert an inbound submission into a normalized lead profile.
///
/// Text fields are trimmed and blank optionals dropped, so downstream
/// scoring and views never see whitespace-only values. The lead id is a
/// placeholder until the service assigns one.
pub fn profile_from_submission(submission: LeadSubmission) -> Result<LeadProfile, IntakeError> {
    let name = submission.name.trim().to_string();
    if name.is_empty() {
        return Err(IntakeError::MissingName);
    }

    let email = submission.email.trim().to_string();
    if email.is_empty() {
        return Err(IntakeError::MissingEmail);
    }
    if !email.contains('@') {
        return Err(IntakeError::InvalidEmail(email));
    }

    let source = {
        let trimmed = submission.source.trim();
        if trimmed.is_empty() {
            "website".to_string()
        } else {
            trimmed.to_string()
        }
    };

    let estimated_value = submission.budget_range.estimated_value();

    Ok(LeadProfile {
        lead_id: LeadId("pending".to_string()),
        name,
        email,
        phone: clean(submission.phone),
        company: clean(submission.company),
        service_type: submission.service_type,
        budget_range: submission.budget_range,
        timeline: submission.timeline,
        location: clean(submission.location),
        website_url: clean(submission.website_url),
        goals: clean(submission.goals),
        source,
        utm_source: clean(submission.utm_source),
        utm_medium: clean(submission.utm_medium),
        utm_campaign: clean(submission.utm_campaign),
        estimated_value,
    })
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

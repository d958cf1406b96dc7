use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{BudgetRange, LeadSubmission, ProjectTimeline, ServiceCategory};

/// Errors raised while reading a lead export.
#[derive(Debug, thiserror::Error)]
pub enum LeadImportError {
    #[error("failed to open lead export '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to read lead export: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row} is missing a contact name or email")]
    IncompleteRow { row: usize },
}

/// Reads CSV lead exports (spreadsheet handoffs, legacy CRM dumps) into
/// intake submissions. Blank cells become absent fields and unknown enum
/// tags fall back to the unspecified bucket, mirroring form intake.
pub struct LeadCsvImporter;

impl LeadCsvImporter {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<LeadSubmission>, LeadImportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LeadImportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<LeadSubmission>, LeadImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut submissions = Vec::new();

        for (index, record) in csv_reader.deserialize::<LeadRow>().enumerate() {
            let row = record?;
            // Header row is line 1, so data rows start at 2.
            let line = index + 2;
            if row.name.trim().is_empty() || row.email.trim().is_empty() {
                return Err(LeadImportError::IncompleteRow { row: line });
            }
            submissions.push(row.into_submission());
        }

        Ok(submissions)
    }
}

#[derive(Debug, Deserialize)]
struct LeadRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Email")]
    email: String,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(rename = "Company", default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(
        rename = "Service Type",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    service_type: Option<String>,
    #[serde(
        rename = "Budget Range",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    budget_range: Option<String>,
    #[serde(rename = "Timeline", default, deserialize_with = "empty_string_as_none")]
    timeline: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(rename = "Website", default, deserialize_with = "empty_string_as_none")]
    website: Option<String>,
    #[serde(rename = "Goals", default, deserialize_with = "empty_string_as_none")]
    goals: Option<String>,
    #[serde(rename = "Source", default, deserialize_with = "empty_string_as_none")]
    source: Option<String>,
}

impl LeadRow {
    fn into_submission(self) -> LeadSubmission {
        LeadSubmission {
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            service_type: self
                .service_type
                .as_deref()
                .map(ServiceCategory::from_tag)
                .unwrap_or_default(),
            budget_range: self
                .budget_range
                .as_deref()
                .map(BudgetRange::from_tag)
                .unwrap_or_default(),
            timeline: self
                .timeline
                .as_deref()
                .map(ProjectTimeline::from_tag)
                .unwrap_or_default(),
            location: self.location,
            website_url: self.website,
            goals: self.goals,
            source: self.source.unwrap_or_else(|| "import".to_string()),
            utm_source: None,
            utm_medium: None,
            utm_campaign: None,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::domain::PartialMatchingCriteria;

/// Request to post a new internship
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInternshipRequest {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub title: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub about_role: Option<String>,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub domain: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub duration: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: SalaryInput,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub work_mode: String,
    #[serde(default)]
    pub criteria: RequirementsInput,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub matching_criteria: PartialMatchingCriteria,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default, rename = "minimumGPA")]
    pub minimum_gpa: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_deadline")]
    pub application_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub positions: Option<u32>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_archived: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryInput {
    pub min: Option<f64>,
    pub max: Option<f64>,
    #[serde(default)]
    pub display: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequirementsInput {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: Option<String>,
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC)
fn deserialize_deadline<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_deadline(value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid applicationDeadline '{}'", value))),
    }
}

pub(crate) fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Request to re-weight an internship's matching configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCriteriaRequest {
    #[serde(default)]
    pub matching_criteria: Option<PartialMatchingCriteria>,
    #[serde(default)]
    pub preferred_skills: Option<Vec<String>>,
    #[serde(default, rename = "minimumGPA")]
    pub minimum_gpa: Option<f64>,
}

/// Request to move an application to a new review state
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query string for the company's application list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListQuery {
    pub internship_id: Option<Uuid>,
    pub status: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Query string for the company's internship list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipListQuery {
    pub status: Option<String>,
    pub domain: Option<String>,
    pub work_mode: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_accepts_date_and_timestamp() {
        let date = parse_deadline("2030-01-15").unwrap();
        assert_eq!(date.to_rfc3339(), "2030-01-15T00:00:00+00:00");

        let ts = parse_deadline("2030-01-15T10:30:00+02:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2030-01-15T08:30:00+00:00");

        assert!(parse_deadline("next tuesday").is_none());
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateInternshipRequest = serde_json::from_str(r#"{"title": "Intern"}"#).unwrap();
        assert_eq!(req.title, "Intern");
        assert!(req.description.is_empty());
        assert!(req.application_deadline.is_none());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_non_array_lists() {
        let parsed: Result<CreateInternshipRequest, _> =
            serde_json::from_str(r#"{"title": "Intern", "requirements": "rust"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_create_request_rejects_non_numeric_weight() {
        let parsed: Result<CreateInternshipRequest, _> =
            serde_json::from_str(r#"{"matchingCriteria": {"skills": "lots"}}"#);
        assert!(parsed.is_err());
    }
}

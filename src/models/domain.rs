use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Company account owning internship postings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub user_id: String,
    pub company_name: String,
    #[serde(default)]
    pub internship_ids: Vec<Uuid>,
}

/// Percentage weights used to rank applications against an internship
///
/// Every weight lies in [0, 100] and the weights sum to 100 (see
/// [`crate::core::criteria`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingCriteria {
    pub skills: f64,
    pub projects: f64,
    pub experience: f64,
    pub gpa: f64,
    pub certifications: f64,
}

impl MatchingCriteria {
    /// Category names paired with their weights, in declaration order
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("skills", self.skills),
            ("projects", self.projects),
            ("experience", self.experience),
            ("gpa", self.gpa),
            ("certifications", self.certifications),
        ]
    }

    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, weight)| weight).sum()
    }
}

impl Default for MatchingCriteria {
    fn default() -> Self {
        Self {
            skills: 40.0,
            projects: 30.0,
            experience: 20.0,
            gpa: 5.0,
            certifications: 5.0,
        }
    }
}

/// Partially specified criteria, merged over a base before validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialMatchingCriteria {
    pub skills: Option<f64>,
    pub projects: Option<f64>,
    pub experience: Option<f64>,
    pub gpa: Option<f64>,
    pub certifications: Option<f64>,
}

impl PartialMatchingCriteria {
    /// Overlay the provided weights on top of `base`
    pub fn merge_over(&self, base: MatchingCriteria) -> MatchingCriteria {
        MatchingCriteria {
            skills: self.skills.unwrap_or(base.skills),
            projects: self.projects.unwrap_or(base.projects),
            experience: self.experience.unwrap_or(base.experience),
            gpa: self.gpa.unwrap_or(base.gpa),
            certifications: self.certifications.unwrap_or(base.certifications),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub min: f64,
    pub max: f64,
    pub display: String,
}

/// Hard requirements listed on a posting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub education: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRef {
    pub name: String,
}

/// Internship posting owned by a company
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company: CompanyRef,
    pub title: String,
    pub description: String,
    pub about_role: String,
    pub domain: String,
    pub duration: String,
    pub location: String,
    pub salary: Salary,
    pub work_mode: String,
    pub criteria: Requirements,
    pub qualifications: Vec<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub matching_criteria: MatchingCriteria,
    pub preferred_skills: Vec<String>,
    #[serde(rename = "minimumGPA")]
    pub minimum_gpa: f64,
    pub application_deadline: Option<DateTime<Utc>>,
    pub positions: u32,
    pub is_published: bool,
    pub is_verified: bool,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Internship {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.application_deadline.is_some_and(|deadline| now > deadline)
    }

    pub fn summary(&self) -> InternshipSummary {
        InternshipSummary {
            id: self.id,
            title: self.title.clone(),
            domain: self.domain.clone(),
            location: self.location.clone(),
        }
    }
}

/// Validated internship fields ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewInternship {
    pub title: String,
    pub description: String,
    pub about_role: String,
    pub domain: String,
    pub duration: String,
    pub location: String,
    pub salary: Salary,
    pub work_mode: String,
    pub criteria: Requirements,
    pub qualifications: Vec<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub matching_criteria: MatchingCriteria,
    pub preferred_skills: Vec<String>,
    pub minimum_gpa: f64,
    pub application_deadline: Option<DateTime<Utc>>,
    pub positions: u32,
    pub is_published: bool,
    pub is_verified: bool,
    pub is_archived: bool,
}

impl NewInternship {
    /// Materialize the posting for `company` with a fresh id
    pub fn into_internship(self, company: &Company, now: DateTime<Utc>) -> Internship {
        Internship {
            id: Uuid::new_v4(),
            company_id: company.id,
            company: CompanyRef {
                name: company.company_name.clone(),
            },
            title: self.title,
            description: self.description,
            about_role: self.about_role,
            domain: self.domain,
            duration: self.duration,
            location: self.location,
            salary: self.salary,
            work_mode: self.work_mode,
            criteria: self.criteria,
            qualifications: self.qualifications,
            requirements: self.requirements,
            benefits: self.benefits,
            matching_criteria: self.matching_criteria,
            preferred_skills: self.preferred_skills,
            minimum_gpa: self.minimum_gpa,
            application_deadline: self.application_deadline,
            positions: self.positions,
            is_published: self.is_published,
            is_verified: self.is_verified,
            is_archived: self.is_archived,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Validated changes to an internship's ranking configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CriteriaUpdate {
    pub matching_criteria: Option<MatchingCriteria>,
    pub preferred_skills: Option<Vec<String>>,
    pub minimum_gpa: Option<f64>,
}

/// Internship fields populated onto an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternshipSummary {
    pub id: Uuid,
    pub title: String,
    pub domain: String,
    pub location: String,
}

/// Review state of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Shortlisted,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewing,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewing => "reviewing",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Status must be one of: pending, reviewing, shortlisted, accepted, rejected (got '{0}')")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApplicationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Applicant details denormalized onto the application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Precomputed match score; `total` is only ever used as a sort key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<serde_json::Value>,
}

/// A student's submission against an internship
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub company_id: Uuid,
    pub internship_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internship: Option<InternshipSummary>,
    pub student: StudentSnapshot,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub notes: String,
    pub match_score: MatchScore,
    pub applied_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Reviewer decision applied to an application
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
    pub notes: String,
    pub reviewed_at: DateTime<Utc>,
}

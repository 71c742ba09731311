use chrono::{DateTime, Utc};
use thiserror::Error;
use validator::Validate;

use crate::core::criteria::{resolve_criteria, CriteriaError};
use crate::models::{
    CreateInternshipRequest, CriteriaUpdate, NewInternship, Requirements, Salary, UpdateCriteriaRequest,
};

/// Reasons an internship posting or criteria update is rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InternshipError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Salary min and max are required")]
    SalaryMissing,

    #[error("Salary min and max must be valid numbers and max >= min")]
    SalaryRange,

    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error("Application deadline must be in the future")]
    DeadlinePassed,

    #[error("minimumGPA must be a non-negative number")]
    MinimumGpa,

    #[error("positions must be between 1 and {max}")]
    PositionsRange { max: u32 },
}

/// Largest accepted `positions`; the column is a Postgres INTEGER
pub const MAX_POSITIONS: u32 = i32::MAX as u32;

/// Validate a posting request against `now` and fill in defaults
pub fn validate_new_internship(
    req: CreateInternshipRequest,
    now: DateTime<Utc>,
) -> Result<NewInternship, InternshipError> {
    if let Err(errors) = req.validate() {
        let mut fields: Vec<String> = errors.field_errors().keys().map(|field| camel_case(field)).collect();
        fields.sort();
        return Err(InternshipError::MissingFields(fields));
    }

    let salary = validate_salary(req.salary.min, req.salary.max, req.salary.display)?;
    let matching_criteria = resolve_criteria(&req.matching_criteria)?;

    if let Some(deadline) = req.application_deadline {
        if deadline <= now {
            return Err(InternshipError::DeadlinePassed);
        }
    }

    let minimum_gpa = validate_minimum_gpa(req.minimum_gpa.unwrap_or(0.0))?;

    let positions = req.positions.filter(|p| *p > 0).unwrap_or(1);
    if positions > MAX_POSITIONS {
        return Err(InternshipError::PositionsRange { max: MAX_POSITIONS });
    }

    Ok(NewInternship {
        title: req.title,
        description: req.description,
        about_role: req.about_role.unwrap_or_default(),
        domain: req.domain,
        duration: req.duration,
        location: req.location,
        salary,
        work_mode: req.work_mode,
        criteria: Requirements {
            skills: req.criteria.skills,
            education: req.criteria.education.unwrap_or_default(),
        },
        qualifications: req.qualifications,
        requirements: req.requirements,
        benefits: req.benefits,
        matching_criteria,
        preferred_skills: req.preferred_skills,
        minimum_gpa,
        application_deadline: req.application_deadline,
        positions,
        is_published: req.is_published,
        is_verified: req.is_verified,
        is_archived: req.is_archived,
    })
}

/// Validate a criteria update; weights are merged over the defaults
pub fn validate_criteria_update(req: UpdateCriteriaRequest) -> Result<CriteriaUpdate, InternshipError> {
    let matching_criteria = req
        .matching_criteria
        .as_ref()
        .map(resolve_criteria)
        .transpose()?;
    let minimum_gpa = req.minimum_gpa.map(validate_minimum_gpa).transpose()?;

    Ok(CriteriaUpdate {
        matching_criteria,
        preferred_skills: req.preferred_skills,
        minimum_gpa,
    })
}

fn validate_salary(min: Option<f64>, max: Option<f64>, display: Option<String>) -> Result<Salary, InternshipError> {
    let (min, max) = match (min, max) {
        (Some(min), Some(max)) => (min, max),
        _ => return Err(InternshipError::SalaryMissing),
    };

    if !min.is_finite() || !max.is_finite() || min < 0.0 || max < min {
        return Err(InternshipError::SalaryRange);
    }

    let display = display
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| format!("{} - {}", min, max));

    Ok(Salary { min, max, display })
}

fn validate_minimum_gpa(gpa: f64) -> Result<f64, InternshipError> {
    if gpa.is_finite() && gpa >= 0.0 {
        Ok(gpa)
    } else {
        Err(InternshipError::MinimumGpa)
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

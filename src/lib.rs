//! Intern Match - company-side service for the internship platform
//!
//! Companies post internships with weighted matching criteria, review the
//! applications students submit, move them through the review pipeline and
//! read aggregate analytics over them.

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{resolve_criteria, validate_new_internship, CriteriaError, InternshipError};
pub use crate::models::{Application, ApplicationStatus, Company, Internship, MatchingCriteria};
pub use crate::routes::{configure_app, AppState};
pub use crate::services::{MemoryStore, PlatformStore, PostgresStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let criteria = MatchingCriteria::default();
        assert!(criteria.validate().is_ok());
        assert_eq!(ApplicationStatus::Pending.as_str(), "pending");
    }
}

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::core::{ApplicationQuery, InternshipQuery};
use crate::models::{
    Application, ApplicationAnalytics, Company, CriteriaUpdate, Internship, InternshipStats, NewInternship,
    StatusUpdate,
};

/// Errors that can occur when reading or writing platform records
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// One page of internships with their application counts
#[derive(Debug, Clone)]
pub struct InternshipPage {
    pub internships: Vec<(Internship, u64)>,
    pub total: u64,
    pub stats: InternshipStats,
}

/// One page of applications plus the total matching the filters
#[derive(Debug, Clone)]
pub struct ApplicationPage {
    pub applications: Vec<Application>,
    pub total: u64,
}

/// Persistence seam for companies, internships and applications
///
/// Every internship and application operation is scoped by `company_id`:
/// a record owned by another company is reported as absent.
#[async_trait]
pub trait PlatformStore: Send + Sync {
    /// Short name used in logs
    fn backend(&self) -> &'static str;

    async fn find_company_by_user(&self, user_id: &str) -> Result<Option<Company>, StoreError>;

    /// Insert the internship and append it to the company's list atomically
    async fn create_internship(&self, company: &Company, internship: NewInternship) -> Result<Internship, StoreError>;

    async fn list_internships(&self, company_id: Uuid, query: &InternshipQuery) -> Result<InternshipPage, StoreError>;

    async fn update_internship_criteria(
        &self,
        company_id: Uuid,
        internship_id: Uuid,
        update: CriteriaUpdate,
    ) -> Result<Option<Internship>, StoreError>;

    async fn list_applications(&self, company_id: Uuid, query: &ApplicationQuery) -> Result<ApplicationPage, StoreError>;

    async fn update_application_status(
        &self,
        company_id: Uuid,
        application_id: Uuid,
        update: StatusUpdate,
    ) -> Result<Option<Application>, StoreError>;

    async fn application_analytics(&self, company_id: Uuid) -> Result<ApplicationAnalytics, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

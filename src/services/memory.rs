use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::{analytics::summarize, sort_applications, ApplicationQuery, InternshipQuery, InternshipStatusFilter};
use crate::models::{
    Application, ApplicationAnalytics, Company, CriteriaUpdate, Internship, InternshipStats, NewInternship,
    StatusUpdate,
};
use crate::services::store::{ApplicationPage, InternshipPage, PlatformStore, StoreError};

#[derive(Debug, Default)]
struct Collections {
    companies: HashMap<Uuid, Company>,
    internships: HashMap<Uuid, Internship>,
    applications: HashMap<Uuid, Application>,
}

/// In-process store for local development and tests
///
/// A single lock guards all collections, so multi-record writes such as
/// internship creation are applied atomically.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a company account owned by `user_id`
    pub async fn insert_company(&self, user_id: &str, company_name: &str) -> Company {
        let company = Company {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            company_name: company_name.to_string(),
            internship_ids: Vec::new(),
        };
        self.inner.write().await.companies.insert(company.id, company.clone());
        company
    }

    /// Store an application submitted through the student surface
    pub async fn insert_application(&self, application: Application) {
        self.inner.write().await.applications.insert(application.id, application);
    }

    pub async fn company(&self, company_id: Uuid) -> Option<Company> {
        self.inner.read().await.companies.get(&company_id).cloned()
    }
}

fn populate(application: &Application, internships: &HashMap<Uuid, Internship>) -> Application {
    let mut populated = application.clone();
    populated.internship = internships.get(&application.internship_id).map(Internship::summary);
    populated
}

#[async_trait]
impl PlatformStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn find_company_by_user(&self, user_id: &str) -> Result<Option<Company>, StoreError> {
        let guard = self.inner.read().await;
        Ok(guard.companies.values().find(|c| c.user_id == user_id).cloned())
    }

    async fn create_internship(&self, company: &Company, internship: NewInternship) -> Result<Internship, StoreError> {
        let mut guard = self.inner.write().await;
        let owner = guard
            .companies
            .get_mut(&company.id)
            .ok_or_else(|| StoreError::Corrupt(format!("company {} disappeared", company.id)))?;

        let internship = internship.into_internship(owner, Utc::now());
        owner.internship_ids.push(internship.id);
        guard.internships.insert(internship.id, internship.clone());

        Ok(internship)
    }

    async fn list_internships(&self, company_id: Uuid, query: &InternshipQuery) -> Result<InternshipPage, StoreError> {
        let guard = self.inner.read().await;
        let owned: Vec<&Internship> = guard
            .internships
            .values()
            .filter(|i| i.company_id == company_id)
            .collect();

        let count = |filter: InternshipStatusFilter| owned.iter().filter(|i| filter.matches(i)).count() as u64;
        let stats_without_total = InternshipStats {
            total: 0,
            published: count(InternshipStatusFilter::Published),
            draft: count(InternshipStatusFilter::Draft),
            archived: count(InternshipStatusFilter::Archived),
        };

        let mut matching: Vec<Internship> = owned.into_iter().filter(|i| query.matches(i)).cloned().collect();
        matching.sort_by(|a, b| query.compare(a, b));
        let total = matching.len() as u64;

        let internships = query
            .page
            .apply(matching)
            .into_iter()
            .map(|internship| {
                let applications = guard
                    .applications
                    .values()
                    .filter(|a| a.internship_id == internship.id)
                    .count() as u64;
                (internship, applications)
            })
            .collect();

        Ok(InternshipPage {
            internships,
            total,
            stats: InternshipStats { total, ..stats_without_total },
        })
    }

    async fn update_internship_criteria(
        &self,
        company_id: Uuid,
        internship_id: Uuid,
        update: CriteriaUpdate,
    ) -> Result<Option<Internship>, StoreError> {
        let mut guard = self.inner.write().await;
        let Some(internship) = guard
            .internships
            .get_mut(&internship_id)
            .filter(|i| i.company_id == company_id)
        else {
            return Ok(None);
        };

        if let Some(criteria) = update.matching_criteria {
            internship.matching_criteria = criteria;
        }
        if let Some(skills) = update.preferred_skills {
            internship.preferred_skills = skills;
        }
        if let Some(gpa) = update.minimum_gpa {
            internship.minimum_gpa = gpa;
        }
        internship.updated_at = Utc::now();

        Ok(Some(internship.clone()))
    }

    async fn list_applications(&self, company_id: Uuid, query: &ApplicationQuery) -> Result<ApplicationPage, StoreError> {
        let guard = self.inner.read().await;
        let matching: Vec<Application> = guard
            .applications
            .values()
            .filter(|a| a.company_id == company_id && query.matches(a))
            .cloned()
            .collect();
        let total = matching.len() as u64;

        let applications = query
            .page
            .apply(sort_applications(matching, query.sort))
            .iter()
            .map(|a| populate(a, &guard.internships))
            .collect();

        Ok(ApplicationPage { applications, total })
    }

    async fn update_application_status(
        &self,
        company_id: Uuid,
        application_id: Uuid,
        update: StatusUpdate,
    ) -> Result<Option<Application>, StoreError> {
        let mut guard = self.inner.write().await;
        let updated = match guard
            .applications
            .get_mut(&application_id)
            .filter(|a| a.company_id == company_id)
        {
            Some(application) => {
                application.status = update.status;
                application.notes = update.notes;
                application.reviewed_at = Some(update.reviewed_at);
                application.clone()
            }
            None => return Ok(None),
        };

        Ok(Some(populate(&updated, &guard.internships)))
    }

    async fn application_analytics(&self, company_id: Uuid) -> Result<ApplicationAnalytics, StoreError> {
        let guard = self.inner.read().await;
        let owned: Vec<Application> = guard
            .applications
            .values()
            .filter(|a| a.company_id == company_id)
            .cloned()
            .collect();

        let internships = &guard.internships;
        Ok(summarize(&owned, |id| internships.get(id).map(|i| i.title.as_str())))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ApplicationSort, PageRequest};
    use crate::models::{
        ApplicationStatus, MatchScore, MatchingCriteria, Requirements, Salary, StudentSnapshot,
    };
    use chrono::Duration;

    fn draft(title: &str, published: bool) -> NewInternship {
        NewInternship {
            title: title.to_string(),
            description: "desc".to_string(),
            about_role: String::new(),
            domain: "Engineering".to_string(),
            duration: "3 months".to_string(),
            location: "Remote".to_string(),
            salary: Salary { min: 1.0, max: 2.0, display: "1 - 2".to_string() },
            work_mode: "remote".to_string(),
            criteria: Requirements::default(),
            qualifications: vec![],
            requirements: vec![],
            benefits: vec![],
            matching_criteria: MatchingCriteria::default(),
            preferred_skills: vec![],
            minimum_gpa: 0.0,
            application_deadline: None,
            positions: 1,
            is_published: published,
            is_verified: false,
            is_archived: false,
        }
    }

    fn application(company: &Company, internship_id: Uuid, score: f64, minutes_ago: i64) -> Application {
        Application {
            id: Uuid::new_v4(),
            company_id: company.id,
            internship_id,
            internship: None,
            student: StudentSnapshot { id: "stu".into(), name: "Student".into(), email: None },
            status: ApplicationStatus::Pending,
            notes: String::new(),
            match_score: MatchScore { total: score, breakdown: None },
            applied_at: Utc::now() - Duration::minutes(minutes_ago),
            reviewed_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_appends_to_company() {
        let store = MemoryStore::new();
        let company = store.insert_company("user-1", "Acme").await;

        let internship = store.create_internship(&company, draft("Backend", true)).await.unwrap();

        let stored = store.company(company.id).await.unwrap();
        assert_eq!(stored.internship_ids, vec![internship.id]);
        assert_eq!(internship.company.name, "Acme");
    }

    #[tokio::test]
    async fn test_records_are_company_scoped() {
        let store = MemoryStore::new();
        let acme = store.insert_company("user-1", "Acme").await;
        let other = store.insert_company("user-2", "Other").await;
        let internship = store.create_internship(&acme, draft("Backend", true)).await.unwrap();
        let app = application(&acme, internship.id, 50.0, 1);
        store.insert_application(app.clone()).await;

        let update = StatusUpdate {
            status: ApplicationStatus::Accepted,
            notes: String::new(),
            reviewed_at: Utc::now(),
        };
        let result = store.update_application_status(other.id, app.id, update).await.unwrap();
        assert!(result.is_none());

        let criteria = store
            .update_internship_criteria(other.id, internship.id, CriteriaUpdate::default())
            .await
            .unwrap();
        assert!(criteria.is_none());
    }

    #[tokio::test]
    async fn test_list_applications_sorted_and_populated() {
        let store = MemoryStore::new();
        let company = store.insert_company("user-1", "Acme").await;
        let internship = store.create_internship(&company, draft("Backend", true)).await.unwrap();
        for (score, age) in [(10.0, 5), (90.0, 30), (50.0, 1)] {
            store.insert_application(application(&company, internship.id, score, age)).await;
        }

        let query = ApplicationQuery {
            sort: ApplicationSort::AppliedAt,
            page: PageRequest { page: 1, limit: 2 },
            ..Default::default()
        };
        let page = store.list_applications(company.id, &query).await.unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.applications.len(), 2);
        assert!(page.applications[0].applied_at >= page.applications[1].applied_at);
        assert_eq!(page.applications[0].internship.as_ref().unwrap().title, "Backend");
    }

    #[tokio::test]
    async fn test_list_internships_stats() {
        let store = MemoryStore::new();
        let company = store.insert_company("user-1", "Acme").await;
        store.create_internship(&company, draft("A", true)).await.unwrap();
        store.create_internship(&company, draft("B", false)).await.unwrap();
        let mut archived = draft("C", true);
        archived.is_archived = true;
        store.create_internship(&company, archived).await.unwrap();

        let query = InternshipQuery {
            status: Some(InternshipStatusFilter::Published),
            page: PageRequest { page: 1, limit: 10 },
            ..Default::default()
        };
        let page = store.list_internships(company.id, &query).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.stats, InternshipStats { total: 1, published: 1, draft: 1, archived: 1 });
        assert_eq!(page.internships[0].0.title, "A");
        assert_eq!(page.internships[0].1, 0);
    }
}

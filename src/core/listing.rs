use std::cmp::Ordering;

use uuid::Uuid;

use crate::models::{Application, ApplicationStatus, Internship, Pagination};

/// Sort key for the company's application list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationSort {
    /// Highest `matchScore.total` first
    #[default]
    MatchScore,
    /// Most recent first
    AppliedAt,
    /// Student name, alphabetical
    Name,
}

impl ApplicationSort {
    /// Unknown or absent keys fall back to match score
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("appliedAt") => ApplicationSort::AppliedAt,
            Some("name") => ApplicationSort::Name,
            _ => ApplicationSort::MatchScore,
        }
    }

    pub fn order_by_sql(&self) -> &'static str {
        match self {
            ApplicationSort::MatchScore => "a.match_score_total DESC, a.applied_at DESC",
            ApplicationSort::AppliedAt => "a.applied_at DESC",
            ApplicationSort::Name => "a.student_name COLLATE \"C\" ASC, a.applied_at DESC",
        }
    }

    pub fn compare(&self, a: &Application, b: &Application) -> Ordering {
        match self {
            ApplicationSort::MatchScore => b
                .match_score
                .total
                .partial_cmp(&a.match_score.total)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.applied_at.cmp(&a.applied_at)),
            ApplicationSort::AppliedAt => b.applied_at.cmp(&a.applied_at),
            ApplicationSort::Name => a
                .student
                .name
                .cmp(&b.student.name)
                .then_with(|| b.applied_at.cmp(&a.applied_at)),
        }
    }
}

/// Filters and ordering for an application listing
#[derive(Debug, Clone, Default)]
pub struct ApplicationQuery {
    pub internship_id: Option<Uuid>,
    pub status: Option<ApplicationStatus>,
    pub sort: ApplicationSort,
    pub page: PageRequest,
}

impl ApplicationQuery {
    pub fn matches(&self, application: &Application) -> bool {
        self.internship_id.map_or(true, |id| application.internship_id == id)
            && self.status.map_or(true, |status| application.status == status)
    }
}

/// Lifecycle bucket used to filter internships
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternshipStatusFilter {
    Published,
    Draft,
    Archived,
}

impl InternshipStatusFilter {
    /// Unknown values apply no filter
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value? {
            "published" => Some(InternshipStatusFilter::Published),
            "draft" => Some(InternshipStatusFilter::Draft),
            "archived" => Some(InternshipStatusFilter::Archived),
            _ => None,
        }
    }

    pub fn matches(&self, internship: &Internship) -> bool {
        match self {
            InternshipStatusFilter::Published => internship.is_published && !internship.is_archived,
            InternshipStatusFilter::Draft => !internship.is_published && !internship.is_archived,
            InternshipStatusFilter::Archived => internship.is_archived,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InternshipSortField {
    #[default]
    CreatedAt,
    Title,
    ApplicationDeadline,
    Positions,
}

impl InternshipSortField {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("title") => InternshipSortField::Title,
            Some("applicationDeadline") => InternshipSortField::ApplicationDeadline,
            Some("positions") => InternshipSortField::Positions,
            _ => InternshipSortField::CreatedAt,
        }
    }

    /// SQL sort expression; text compares bytewise to match the in-memory order
    pub fn order_expr(&self) -> &'static str {
        match self {
            InternshipSortField::CreatedAt => "i.created_at",
            InternshipSortField::Title => "i.title COLLATE \"C\"",
            InternshipSortField::ApplicationDeadline => "i.application_deadline",
            InternshipSortField::Positions => "i.positions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filters and ordering for an internship listing
#[derive(Debug, Clone, Default)]
pub struct InternshipQuery {
    pub status: Option<InternshipStatusFilter>,
    pub domain: Option<String>,
    pub work_mode: Option<String>,
    pub sort_field: InternshipSortField,
    pub sort_order: SortOrder,
    pub page: PageRequest,
}

impl InternshipQuery {
    pub fn matches(&self, internship: &Internship) -> bool {
        if let Some(status) = &self.status {
            if !status.matches(internship) {
                return false;
            }
        }
        if let Some(domain) = &self.domain {
            if !internship.domain.to_lowercase().contains(&domain.to_lowercase()) {
                return false;
            }
        }
        if let Some(work_mode) = &self.work_mode {
            if &internship.work_mode != work_mode {
                return false;
            }
        }
        true
    }

    pub fn compare(&self, a: &Internship, b: &Internship) -> Ordering {
        let ordering = match self.sort_field {
            InternshipSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            InternshipSortField::Title => a.title.cmp(&b.title),
            // Postgres orders NULL deadlines last ascending; mirror that here.
            InternshipSortField::ApplicationDeadline => match (a.application_deadline, b.application_deadline) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            InternshipSortField::Positions => a.positions.cmp(&b.positions),
        };
        match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// One-based page window over a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

impl PageRequest {
    /// Clamp the requested window: page >= 1, limit in [1, max_limit]
    pub fn new(page: Option<u32>, limit: Option<u32>, default_limit: u32, max_limit: u32) -> Self {
        let max_limit = max_limit.max(1);
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(default_limit).clamp(1, max_limit),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    /// Slice `items` to this page
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset() as usize)
            .take(self.limit as usize)
            .collect()
    }

    pub fn pagination(&self, total: u64) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
            total,
            pages: total.div_ceil(self.limit as u64),
            has_next: None,
            has_prev: None,
        }
    }

    /// Pagination including next/previous flags
    pub fn pagination_with_links(&self, total: u64) -> Pagination {
        Pagination {
            has_next: Some(self.offset() + (self.limit as u64) < total),
            has_prev: Some(self.page > 1),
            ..self.pagination(total)
        }
    }
}

/// Sort applications in memory
pub fn sort_applications(mut applications: Vec<Application>, sort: ApplicationSort) -> Vec<Application> {
    applications.sort_by(|a, b| sort.compare(a, b));
    applications
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchScore, StudentSnapshot};
    use chrono::{Duration, Utc};

    fn application(name: &str, score: f64, minutes_ago: i64) -> Application {
        Application {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            internship_id: Uuid::nil(),
            internship: None,
            student: StudentSnapshot { id: name.to_lowercase(), name: name.to_string(), email: None },
            status: ApplicationStatus::Pending,
            notes: String::new(),
            match_score: MatchScore { total: score, breakdown: None },
            applied_at: Utc::now() - Duration::minutes(minutes_ago),
            reviewed_at: None,
        }
    }

    #[test]
    fn test_sort_parsing_falls_back() {
        assert_eq!(ApplicationSort::parse(Some("appliedAt")), ApplicationSort::AppliedAt);
        assert_eq!(ApplicationSort::parse(Some("name")), ApplicationSort::Name);
        assert_eq!(ApplicationSort::parse(Some("bogus")), ApplicationSort::MatchScore);
        assert_eq!(ApplicationSort::parse(None), ApplicationSort::MatchScore);
        assert_eq!(InternshipSortField::parse(Some("salary")), InternshipSortField::CreatedAt);
        assert_eq!(SortOrder::parse(Some("ASC")), SortOrder::Desc);
        assert_eq!(InternshipStatusFilter::parse(Some("closed")), None);
    }

    #[test]
    fn test_sort_by_match_score() {
        let apps = vec![application("Bo", 55.0, 1), application("Al", 90.0, 2), application("Cy", 70.0, 3)];
        let sorted = sort_applications(apps, ApplicationSort::MatchScore);
        let scores: Vec<f64> = sorted.iter().map(|a| a.match_score.total).collect();
        assert_eq!(scores, vec![90.0, 70.0, 55.0]);
    }

    #[test]
    fn test_sort_by_applied_at_is_non_increasing() {
        let apps = vec![application("Bo", 55.0, 30), application("Al", 90.0, 5), application("Cy", 70.0, 60)];
        let sorted = sort_applications(apps, ApplicationSort::AppliedAt);
        assert!(sorted.windows(2).all(|w| w[0].applied_at >= w[1].applied_at));
    }

    #[test]
    fn test_sort_by_name() {
        let apps = vec![application("Cy", 1.0, 1), application("Al", 2.0, 2), application("Bo", 3.0, 3)];
        let sorted = sort_applications(apps, ApplicationSort::Name);
        let names: Vec<&str> = sorted.iter().map(|a| a.student.name.as_str()).collect();
        assert_eq!(names, vec!["Al", "Bo", "Cy"]);
    }

    #[test]
    fn test_name_order_is_bytewise_in_both_backends() {
        let apps = vec![application("abe", 1.0, 1), application("Zed", 2.0, 2), application("Ann", 3.0, 3)];
        let sorted = sort_applications(apps, ApplicationSort::Name);
        let names: Vec<&str> = sorted.iter().map(|a| a.student.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Zed", "abe"]);

        assert!(ApplicationSort::Name.order_by_sql().starts_with("a.student_name COLLATE \"C\" ASC"));
        assert_eq!(InternshipSortField::Title.order_expr(), "i.title COLLATE \"C\"");
    }

    #[test]
    fn test_application_query_filters() {
        let internship = Uuid::new_v4();
        let mut pending = application("Al", 1.0, 1);
        pending.internship_id = internship;
        let mut accepted = application("Bo", 1.0, 1);
        accepted.internship_id = internship;
        accepted.status = ApplicationStatus::Accepted;
        let other = application("Cy", 1.0, 1);

        let by_internship = ApplicationQuery { internship_id: Some(internship), ..Default::default() };
        assert!(by_internship.matches(&pending));
        assert!(by_internship.matches(&accepted));
        assert!(!by_internship.matches(&other));

        let by_both = ApplicationQuery {
            internship_id: Some(internship),
            status: Some(ApplicationStatus::Pending),
            ..Default::default()
        };
        assert!(by_both.matches(&pending));
        assert!(!by_both.matches(&accepted));
        assert!(!by_both.matches(&other));
    }

    #[test]
    fn test_page_request_clamps() {
        let page = PageRequest::new(Some(0), Some(500), 20, 100);
        assert_eq!(page, PageRequest { page: 1, limit: 100 });

        let page = PageRequest::new(None, Some(0), 20, 100);
        assert_eq!(page.limit, 1);

        let page = PageRequest::new(Some(3), None, 10, 100);
        assert_eq!(page.offset(), 20);
    }

    #[test]
    fn test_pagination_math() {
        let page = PageRequest { page: 2, limit: 10 };
        let pagination = page.pagination_with_links(25);
        assert_eq!(pagination.pages, 3);
        assert_eq!(pagination.has_next, Some(true));
        assert_eq!(pagination.has_prev, Some(true));

        let last = PageRequest { page: 3, limit: 10 }.pagination_with_links(25);
        assert_eq!(last.has_next, Some(false));

        let empty = PageRequest { page: 1, limit: 10 }.pagination(0);
        assert_eq!(empty.pages, 0);
    }

    #[test]
    fn test_page_apply() {
        let page = PageRequest { page: 2, limit: 2 };
        assert_eq!(page.apply(vec![1, 2, 3, 4, 5]), vec![3, 4]);
    }
}

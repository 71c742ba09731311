// Core rule exports
pub mod analytics;
pub mod criteria;
pub mod internship;
pub mod listing;

pub use analytics::summarize;
pub use criteria::{resolve_criteria, CriteriaError, TOTAL_TOLERANCE};
pub use internship::{validate_criteria_update, validate_new_internship, InternshipError, MAX_POSITIONS};
pub use listing::{
    sort_applications, ApplicationQuery, ApplicationSort, InternshipQuery, InternshipSortField,
    InternshipStatusFilter, PageRequest, SortOrder,
};

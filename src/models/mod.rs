// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Application, ApplicationStatus, Company, CompanyRef, CriteriaUpdate, Internship, InternshipSummary,
    MatchScore, MatchingCriteria, NewInternship, PartialMatchingCriteria, Requirements, Salary,
    StatusUpdate, StudentSnapshot, UnknownStatus,
};
pub use requests::{
    ApplicationListQuery, CreateInternshipRequest, InternshipListQuery, RequirementsInput, SalaryInput,
    UpdateCriteriaRequest, UpdateStatusRequest,
};
pub use responses::{
    ApplicationAnalytics, ApplicationListResponse, ApplicationResponse, ErrorResponse, HealthResponse,
    InternshipListData, InternshipListResponse, InternshipListing, InternshipResponse, InternshipStats,
    Pagination, TopInternship,
};

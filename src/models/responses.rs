use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{Application, Internship};

/// Page metadata returned alongside listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_prev: Option<bool>,
}

/// Response for the application listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<Application>,
    pub pagination: Pagination,
}

/// Internship with per-item listing statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipListing {
    #[serde(flatten)]
    pub internship: Internship,
    pub application_count: u64,
    pub is_expired: bool,
}

/// Posting counts across the company's internships
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternshipStats {
    pub total: u64,
    pub published: u64,
    pub draft: u64,
    pub archived: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternshipListData {
    pub internships: Vec<InternshipListing>,
    pub stats: InternshipStats,
    pub pagination: Pagination,
}

/// Response for the internship listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternshipListResponse {
    pub success: bool,
    pub data: InternshipListData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternshipResponse {
    pub message: String,
    pub internship: Internship,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub message: String,
    pub application: Application,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopInternship {
    pub internship_id: Uuid,
    pub title: String,
    pub count: u64,
}

/// Aggregate view over a company's applications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAnalytics {
    pub total_applications: u64,
    pub status_counts: BTreeMap<String, u64>,
    pub average_match_score: f64,
    pub top_internships: Vec<TopInternship>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

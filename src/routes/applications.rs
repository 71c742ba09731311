use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::core::{ApplicationQuery, ApplicationSort, PageRequest};
use crate::models::{
    ApplicationAnalytics, ApplicationListQuery, ApplicationListResponse, ApplicationResponse, ApplicationStatus,
    StatusUpdate, UpdateStatusRequest,
};
use crate::routes::company::current_company;
use crate::routes::{ApiError, AppState};
use crate::services::{CacheError, CacheKey, CompanyUser};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/applications/analytics", web::get().to(application_analytics))
        .route("/applications", web::get().to(list_applications))
        .route("/applications/{application_id}/status", web::patch().to(update_status));
}

/// List applications across the company's internships
///
/// GET /api/v1/company/applications?internshipId=&status=&sortBy=&page=&limit=
///
/// `sortBy` is one of `matchScore` (default), `appliedAt` or `name`.
async fn list_applications(
    state: web::Data<AppState>,
    user: CompanyUser,
    params: web::Query<ApplicationListQuery>,
) -> Result<HttpResponse, ApiError> {
    let company = current_company(&state, &user, "Failed to fetch applications").await?;
    let params = params.into_inner();

    let status = params
        .status
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::parse::<ApplicationStatus>)
        .transpose()?;

    let query = ApplicationQuery {
        internship_id: params.internship_id,
        status,
        sort: ApplicationSort::parse(params.sort_by.as_deref()),
        page: PageRequest::new(
            params.page,
            params.limit,
            state.listing.default_application_limit,
            state.listing.max_limit,
        ),
    };

    let page = state
        .store
        .list_applications(company.id, &query)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch applications", e))?;

    tracing::debug!(
        "Listed {} of {} applications for company {}",
        page.applications.len(),
        page.total,
        company.id
    );

    Ok(HttpResponse::Ok().json(ApplicationListResponse {
        applications: page.applications,
        pagination: query.page.pagination(page.total),
    }))
}

/// Move an application to a new review state
///
/// PATCH /api/v1/company/applications/{application_id}/status
async fn update_status(
    state: web::Data<AppState>,
    user: CompanyUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let company = current_company(&state, &user, "Failed to update application status").await?;
    let application_id = path.into_inner();
    let req = req.into_inner();

    if req.validate().is_err() {
        return Err(ApiError::Validation("Status is required".to_string()));
    }
    let status: ApplicationStatus = req.status.parse()?;

    let update = StatusUpdate {
        status,
        notes: req.notes.unwrap_or_default(),
        reviewed_at: Utc::now(),
    };

    let application = state
        .store
        .update_application_status(company.id, application_id, update)
        .await
        .map_err(|e| ApiError::internal("Failed to update application status", e))?
        .ok_or_else(|| ApiError::not_found("Application"))?;

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.delete(&CacheKey::analytics(company.id)).await {
            tracing::warn!("Failed to invalidate analytics cache for company {}: {}", company.id, e);
        }
    }

    tracing::info!(
        "Company {} moved application {} to {}",
        company.id,
        application.id,
        application.status
    );

    Ok(HttpResponse::Ok().json(ApplicationResponse {
        message: "Application status updated successfully".to_string(),
        application,
    }))
}

/// Aggregate counts and scores over the company's applications
///
/// GET /api/v1/company/applications/analytics
async fn application_analytics(state: web::Data<AppState>, user: CompanyUser) -> Result<HttpResponse, ApiError> {
    let company = current_company(&state, &user, "Failed to fetch analytics").await?;
    let key = CacheKey::analytics(company.id);

    if let Some(cache) = &state.cache {
        match cache.get::<ApplicationAnalytics>(&key).await {
            Ok(analytics) => return Ok(HttpResponse::Ok().json(analytics)),
            Err(CacheError::CacheMiss(_)) => {}
            Err(e) => tracing::warn!("Analytics cache read failed for company {}: {}", company.id, e),
        }
    }

    let analytics = state
        .store
        .application_analytics(company.id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch analytics", e))?;

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set(&key, &analytics).await {
            tracing::warn!("Analytics cache write failed for company {}: {}", company.id, e);
        }
    }

    Ok(HttpResponse::Ok().json(analytics))
}

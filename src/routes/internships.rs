use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use crate::core::{
    validate_criteria_update, validate_new_internship, InternshipQuery, InternshipSortField, InternshipStatusFilter,
    PageRequest, SortOrder,
};
use crate::models::{
    CreateInternshipRequest, InternshipListData, InternshipListQuery, InternshipListResponse, InternshipListing,
    InternshipResponse, UpdateCriteriaRequest,
};
use crate::routes::company::current_company;
use crate::routes::{ApiError, AppState};
use crate::services::CompanyUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/internships", web::post().to(create_internship))
        .route("/internships", web::get().to(list_internships))
        .route("/internships/{internship_id}/criteria", web::patch().to(update_criteria));
}

/// Post a new internship
///
/// POST /api/v1/company/internships
///
/// `matchingCriteria` weights default to 40/30/20/5/5 and must sum to 100
/// (within 0.01). `applicationDeadline` must be in the future.
async fn create_internship(
    state: web::Data<AppState>,
    user: CompanyUser,
    req: web::Json<CreateInternshipRequest>,
) -> Result<HttpResponse, ApiError> {
    let company = current_company(&state, &user, "Failed to create internship").await?;

    let new_internship = validate_new_internship(req.into_inner(), Utc::now()).map_err(|e| {
        tracing::info!("Rejected internship for company {}: {}", company.id, e);
        e
    })?;

    let internship = state
        .store
        .create_internship(&company, new_internship)
        .await
        .map_err(|e| ApiError::internal("Failed to create internship", e))?;

    tracing::info!(
        "Company {} created internship {} ({})",
        company.id,
        internship.id,
        internship.title
    );

    Ok(HttpResponse::Created().json(InternshipResponse {
        message: "Internship created successfully".to_string(),
        internship,
    }))
}

/// List the company's internships with per-posting statistics
///
/// GET /api/v1/company/internships?status=&domain=&workMode=&sortBy=&sortOrder=&page=&limit=
async fn list_internships(
    state: web::Data<AppState>,
    user: CompanyUser,
    params: web::Query<InternshipListQuery>,
) -> Result<HttpResponse, ApiError> {
    let company = current_company(&state, &user, "Failed to fetch internships").await?;
    let params = params.into_inner();

    let query = InternshipQuery {
        status: InternshipStatusFilter::parse(params.status.as_deref()),
        domain: params.domain.filter(|d| !d.trim().is_empty()),
        work_mode: params.work_mode.filter(|w| !w.trim().is_empty()),
        sort_field: InternshipSortField::parse(params.sort_by.as_deref()),
        sort_order: SortOrder::parse(params.sort_order.as_deref()),
        page: PageRequest::new(
            params.page,
            params.limit,
            state.listing.default_internship_limit,
            state.listing.max_limit,
        ),
    };

    let page = state
        .store
        .list_internships(company.id, &query)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch internships", e))?;

    let now = Utc::now();
    let internships = page
        .internships
        .into_iter()
        .map(|(internship, application_count)| InternshipListing {
            is_expired: internship.is_expired(now),
            application_count,
            internship,
        })
        .collect();

    Ok(HttpResponse::Ok().json(InternshipListResponse {
        success: true,
        data: InternshipListData {
            internships,
            stats: page.stats,
            pagination: query.page.pagination_with_links(page.total),
        },
    }))
}

/// Re-weight an internship's matching configuration
///
/// PATCH /api/v1/company/internships/{internship_id}/criteria
async fn update_criteria(
    state: web::Data<AppState>,
    user: CompanyUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateCriteriaRequest>,
) -> Result<HttpResponse, ApiError> {
    let company = current_company(&state, &user, "Failed to update internship criteria").await?;
    let internship_id = path.into_inner();

    let update = validate_criteria_update(req.into_inner())?;

    let internship = state
        .store
        .update_internship_criteria(company.id, internship_id, update)
        .await
        .map_err(|e| ApiError::internal("Failed to update internship criteria", e))?
        .ok_or_else(|| ApiError::not_found("Internship"))?;

    tracing::info!("Company {} updated criteria of internship {}", company.id, internship.id);

    Ok(HttpResponse::Ok().json(InternshipResponse {
        message: "Internship criteria updated successfully".to_string(),
        internship,
    }))
}

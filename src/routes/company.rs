use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::Company;
use crate::routes::{ApiError, AppState};
use crate::services::CompanyUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(dashboard));
}

/// GET /api/v1/company/dashboard
async fn dashboard(user: CompanyUser) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Welcome to the Company Dashboard",
        "user": user,
    }))
}

/// Resolve the company owned by the caller
///
/// `context` labels the 500 response if the lookup itself fails.
pub(crate) async fn current_company(
    state: &AppState,
    user: &CompanyUser,
    context: &'static str,
) -> Result<Company, ApiError> {
    state
        .store
        .find_company_by_user(user.user_id())
        .await
        .map_err(|e| ApiError::internal(context, e))?
        .ok_or_else(|| {
            tracing::info!("No company registered for user {}", user.user_id());
            ApiError::not_found("Company")
        })
}

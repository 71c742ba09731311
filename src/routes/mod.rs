// Route exports
pub mod applications;
pub mod company;
pub mod error;
pub mod health;
pub mod internships;

use std::sync::Arc;

use actix_web::web;

use crate::config::ListingSettings;
use crate::services::{CacheManager, JwtVerifier, PlatformStore};

pub use error::{handle_json_payload_error, handle_path_error, handle_query_payload_error, ApiError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlatformStore>,
    pub cache: Option<Arc<CacheManager>>,
    pub listing: ListingSettings,
}

impl AppState {
    pub fn new(store: Arc<dyn PlatformStore>, cache: Option<Arc<CacheManager>>, listing: ListingSettings) -> Self {
        Self { store, cache, listing }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .service(
                web::scope("/company")
                    .configure(company::configure)
                    .configure(internships::configure)
                    .configure(applications::configure),
            ),
    );
}

/// Register shared state, extractor error handlers and every route
///
/// Used by the server binary and by integration tests so both run the same
/// application.
pub fn configure_app(
    state: AppState,
    verifier: web::Data<JwtVerifier>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state))
            .app_data(verifier)
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .configure(configure_routes);
    }
}

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use intern_match::config::{CacheSettings, Settings, StorageBackend};
use intern_match::logging;
use intern_match::routes::{self, AppState};
use intern_match::services::{CacheManager, JwtVerifier, MemoryStore, PlatformStore, PostgresStore};
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    logging::init(&settings.logging);
    info!("Starting Intern Match company service...");

    let store: Arc<dyn PlatformStore> = match settings.database.backend {
        StorageBackend::Postgres => {
            let store = PostgresStore::from_settings(&settings.database).await.map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e)
            })?;
            info!(
                "PostgreSQL store initialized (max: {} connections)",
                settings.database.max_connections.unwrap_or(10)
            );
            Arc::new(store)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory store; records are lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    let cache = build_cache(&settings.cache).await;
    let verifier = web::Data::new(JwtVerifier::new(&settings.auth.jwt_secret));
    let app_state = AppState::new(store, cache, settings.listing);

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_app(app_state.clone(), verifier.clone()))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

/// Analytics cache; Redis when configured, otherwise an in-process tier
///
/// A Redis URL that cannot be reached disables caching rather than falling
/// back to per-instance entries that other instances could not invalidate.
async fn build_cache(settings: &CacheSettings) -> Option<Arc<CacheManager>> {
    if !settings.enabled {
        info!("Analytics cache disabled");
        return None;
    }

    let ttl = settings.ttl_secs.unwrap_or(60);
    let l1_size = settings.l1_cache_size.unwrap_or(1000);

    let cache = match CacheManager::new(settings.redis_url.as_deref(), l1_size, ttl).await {
        Ok(cache) => cache,
        Err(e) => {
            error!("Failed to connect to Redis ({}), analytics cache disabled", e);
            return None;
        }
    };

    info!(
        "Cache manager initialized (TTL: {}s, shared tier: {})",
        ttl,
        cache.has_shared_tier()
    );
    Some(Arc::new(cache))
}

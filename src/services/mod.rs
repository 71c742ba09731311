// Service exports
pub mod auth;
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod store;

pub use auth::{AuthError, AuthenticatedUser, Claims, CompanyUser, JwtVerifier, Role};
pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use store::{ApplicationPage, InternshipPage, PlatformStore, StoreError};

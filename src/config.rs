use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub listing: ListingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Where platform records live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

/// Analytics cache; off unless enabled, see `CacheManager` for tiering
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    #[serde(default)]
    pub enabled: bool,
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
}

/// Page size limits for listing endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListingSettings {
    #[serde(default = "default_application_limit")]
    pub default_application_limit: u32,
    #[serde(default = "default_internship_limit")]
    pub default_internship_limit: u32,
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            default_application_limit: default_application_limit(),
            default_internship_limit: default_internship_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_application_limit() -> u32 { 20 }
fn default_internship_limit() -> u32 { 10 }
fn default_max_limit() -> u32 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with INTERN_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., INTERN__SERVER__PORT -> server.port
            .add_source(prefixed_env())
            .build()?;

        apply_well_known_env(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(prefixed_env())
            .build()?;

        apply_well_known_env(settings)?.try_deserialize()
    }
}

fn prefixed_env() -> Environment {
    Environment::with_prefix("INTERN")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honour the conventional `DATABASE_URL`, `REDIS_URL` and `JWT_SECRET`
/// variables on top of the prefixed ones
fn apply_well_known_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", url)?;
    }
    if let Ok(url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", url)?;
    }
    if let Ok(secret) = env::var("JWT_SECRET") {
        builder = builder.set_override("auth.jwt_secret", secret)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_listing_limits() {
        let listing = ListingSettings::default();
        assert_eq!(listing.default_application_limit, 20);
        assert_eq!(listing.default_internship_limit, 10);
        assert_eq!(listing.max_limit, 100);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_shipped_defaults_load() {
        let settings = Settings::load_from("config/default.toml").unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.listing.default_internship_limit, 10);
        assert_eq!(settings.cache.ttl_secs, Some(60));
    }

    #[test]
    fn test_load_from_honours_well_known_env() {
        std::env::set_var("JWT_SECRET", "from-env");
        let settings = Settings::load_from("config/default.toml");
        std::env::remove_var("JWT_SECRET");

        assert_eq!(settings.unwrap().auth.jwt_secret, "from-env");
    }

    #[test]
    fn test_minimal_toml_parses() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            backend = "memory"
            url = "unused"

            [auth]
            jwt_secret = "secret"
        "#;

        let settings: Settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.database.backend, StorageBackend::Memory);
        assert!(!settings.cache.enabled);
        assert!(settings.cache.redis_url.is_none());
        assert_eq!(settings.listing.max_limit, 100);
    }
}

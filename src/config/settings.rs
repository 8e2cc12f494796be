//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ACCESS_TOKEN_TTL_HOURS, DEFAULT_CORS_ORIGIN, DEFAULT_DATABASE_URL,
    DEFAULT_REFRESH_TOKEN_TTL_DAYS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, ENV_PRODUCTION,
    MAX_ACCESS_TOKEN_TTL_HOURS, MAX_REFRESH_TOKEN_TTL_DAYS, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub access_token_ttl_hours: i64,
    pub refresh_token_ttl_days: i64,
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl_hours", &self.access_token_ttl_hours)
            .field("refresh_token_ttl_days", &self.refresh_token_ttl_days)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("environment", &self.environment)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if JWT_SECRET is missing in a release build or shorter than
    /// the minimum length, or if a token lifetime is out of range.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| vec![DEFAULT_CORS_ORIGIN.to_string()]);

        let config = Self::new(
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
        )?;

        Self {
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env_parse("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
            environment: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            cors_origins,
            ..config
        }
        .with_token_ttls(
            env_parse("ACCESS_TOKEN_TTL_HOURS").unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_HOURS),
            env_parse("REFRESH_TOKEN_TTL_DAYS").unwrap_or(DEFAULT_REFRESH_TOKEN_TTL_DAYS),
        )
    }

    /// Build a configuration with defaults for everything but the database
    /// URL and signing secret.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: database_url.into(),
            jwt_secret,
            access_token_ttl_hours: DEFAULT_ACCESS_TOKEN_TTL_HOURS,
            refresh_token_ttl_days: DEFAULT_REFRESH_TOKEN_TTL_DAYS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
        })
    }

    /// Set token lifetimes, rejecting values outside `1..=max`.
    pub fn with_token_ttls(mut self, access_hours: i64, refresh_days: i64) -> AppResult<Self> {
        if !(1..=MAX_ACCESS_TOKEN_TTL_HOURS).contains(&access_hours) {
            return Err(AppError::internal(format!(
                "ACCESS_TOKEN_TTL_HOURS must be between 1 and {}",
                MAX_ACCESS_TOKEN_TTL_HOURS
            )));
        }
        if !(1..=MAX_REFRESH_TOKEN_TTL_DAYS).contains(&refresh_days) {
            return Err(AppError::internal(format!(
                "REFRESH_TOKEN_TTL_DAYS must be between 1 and {}",
                MAX_REFRESH_TOKEN_TTL_DAYS
            )));
        }

        self.access_token_ttl_hours = access_hours;
        self.refresh_token_ttl_days = refresh_days;
        Ok(self)
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Whether cookies must carry the `Secure` attribute.
    pub fn is_production(&self) -> bool {
        self.environment == ENV_PRODUCTION
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_secret_rejected() {
        assert!(Config::new("postgres://localhost/db", "short").is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::new("postgres://localhost/db", "a".repeat(32)).unwrap();
        assert_eq!(config.access_token_ttl_hours, 24);
        assert_eq!(config.refresh_token_ttl_days, 7);
        assert_eq!(config.server_addr(), "0.0.0.0:3333");
        assert!(!config.is_production());
    }

    #[test]
    fn test_token_ttls_bounded() {
        let config = || Config::new("postgres://localhost/db", "a".repeat(32)).unwrap();

        let custom = config().with_token_ttls(2, 30).unwrap();
        assert_eq!(custom.access_token_ttl_hours, 2);
        assert_eq!(custom.refresh_token_ttl_days, 30);

        assert!(config().with_token_ttls(0, 7).is_err());
        assert!(config().with_token_ttls(24, -1).is_err());
        assert!(config().with_token_ttls(i64::MAX, 7).is_err());
        assert!(config().with_token_ttls(24, i64::MAX).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::new("postgres://user:pw@localhost/db", "s".repeat(40)).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("pw@localhost"));
        assert!(!debug.contains(&"s".repeat(40)));
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://a.test, ,http://b.test "),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}

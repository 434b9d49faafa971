//! Application configuration
//!
//! Runtime settings come from environment variables (a `.env` file is
//! honored); everything has a workable default so the server starts with
//! zero setup. Fixed lifetimes live here as constants.

use std::env;

/// Guest cookie lifetime in days
pub const GUEST_COOKIE_TTL_DAYS: i64 = 30;

/// Bearer token lifetime in days
pub const AUTH_TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    pub cors_origin: String,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Unset variables fall back to development defaults. A default JWT
    /// secret is logged as a warning, since tokens signed with it are
    /// forgeable by anyone reading the source.
    pub fn from_env() -> Self {
        let host = env::var("TODO_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("TODO_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5237);
        let database_path =
            env::var("TODO_DATABASE_PATH").unwrap_or_else(|_| "todo.db".to_string());
        let jwt_secret = env::var("TODO_JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("TODO_JWT_SECRET not set, using insecure default");
            "dev-only-insecure-secret".to_string()
        });
        let cors_origin =
            env::var("TODO_CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:5173".to_string());

        Self {
            host,
            port,
            database_path,
            jwt_secret,
            cors_origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetimes_are_sane() {
        assert!(GUEST_COOKIE_TTL_DAYS > AUTH_TOKEN_TTL_DAYS);
        assert!(AUTH_TOKEN_TTL_DAYS >= 1);
    }
}

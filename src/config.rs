//! Database endpoint configuration, read once at startup.

use crate::error::ConfigError;

/// Connection settings for the remote libsql HTTP endpoint. Both values come
/// from the environment and are fixed for the process lifetime.
#[derive(Clone, Debug)]
pub struct DbConfig {
    /// Endpoint URL with the `libsql://` scheme rewritten to `https://`.
    pub http_url: String,
    /// Bearer credential sent with every statement execution request.
    pub auth_token: String,
}

impl DbConfig {
    pub fn new(database_url: &str, auth_token: String) -> Self {
        DbConfig {
            http_url: database_url.replacen("libsql://", "https://", 1),
            auth_token,
        }
    }

    /// Read `TURSO_DATABASE_URL` and `TURSO_AUTH_TOKEN`. Absence of either is
    /// a fatal startup condition.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("TURSO_DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("TURSO_DATABASE_URL"))?;
        let token = std::env::var("TURSO_AUTH_TOKEN")
            .map_err(|_| ConfigError::MissingVar("TURSO_AUTH_TOKEN"))?;
        Ok(DbConfig::new(&url, token))
    }
}

use std::{env, time::Duration};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use secrecy::SecretString;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database: DatabaseConfig,
    pub listen_addr: String,
    pub cors_origin: Option<String>,
    pub auth: AuthConfig,
    pub sentry_dsn: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: SecretString,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable `{0}` is not set")]
    MissingVar(&'static str),
    #[error("invalid value for environment variable `{0}`")]
    InvalidVar(&'static str),
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("SERVER_DATABASE_URL")
            .or_else(|| var("DATABASE_URL"))
            .ok_or(ConfigError::MissingVar("SERVER_DATABASE_URL"))?;

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidVar("DATABASE_MAX_CONNECTIONS"))?,
            None => 10,
        };

        let acquire_timeout_secs = match var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidVar("DATABASE_ACQUIRE_TIMEOUT_SECS"))?,
            None => 5,
        };

        let listen_addr = var("SERVER_LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let cors_origin = var("CORS_ORIGIN");
        let sentry_dsn = var("SENTRY_DSN");

        let auth = AuthConfig::from_lookup(&var)?;

        Ok(Self {
            database: DatabaseConfig {
                url: SecretString::new(database_url.into()),
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
            listen_addr,
            cors_origin,
            auth,
            sentry_dsn,
        })
    }
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    jwt_secret: SecretString,
    issuer: Option<String>,
}

impl AuthConfig {
    pub fn new(jwt_secret: SecretString, issuer: Option<String>) -> Self {
        Self { jwt_secret, issuer }
    }

    fn from_lookup<F>(var: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret =
            var("DESKDROP_JWT_SECRET").ok_or(ConfigError::MissingVar("DESKDROP_JWT_SECRET"))?;
        validate_jwt_secret(&jwt_secret)?;

        Ok(Self {
            jwt_secret: SecretString::new(jwt_secret.into()),
            issuer: var("DESKDROP_JWT_ISSUER"),
        })
    }

    /// Base64-encoded HMAC key shared with the identity provider.
    pub fn jwt_secret(&self) -> &SecretString {
        &self.jwt_secret
    }

    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }
}

fn validate_jwt_secret(secret: &str) -> Result<(), ConfigError> {
    let decoded = BASE64_STANDARD
        .decode(secret.as_bytes())
        .map_err(|_| ConfigError::InvalidVar("DESKDROP_JWT_SECRET"))?;

    if decoded.len() < 32 {
        return Err(ConfigError::InvalidVar("DESKDROP_JWT_SECRET"));
    }

    Ok(())
}

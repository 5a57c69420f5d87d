use std::fmt;

use thiserror::Error;

use crate::config::env::{self, EnvKey};

/// HMAC-SHA256 keys shorter than the digest size weaken the signature.
pub const MIN_JWT_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("{0} must be at least 32 bytes long")]
    SecretTooShort(&'static str),
}

/// Credentials for the account created on first start when no super admin exists.
#[derive(Clone)]
pub struct SuperAdminSeed {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SuperAdminSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuperAdminSeed")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub cors_allowed_origin: Option<String>,
    pub super_admin: Option<SuperAdminSeed>,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        let jwt_secret = required(EnvKey::JwtSecret)?;
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::SecretTooShort(EnvKey::JwtSecret.as_str()));
        }

        let super_admin = match (
            env::get_optional(EnvKey::SuperAdminEmail),
            env::get_optional(EnvKey::SuperAdminPassword),
        ) {
            (Some(email), Some(password)) => Some(SuperAdminSeed {
                name: env::get_or(EnvKey::SuperAdminName, "Super Admin"),
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, 3000),
            database_url: required(EnvKey::DatabaseUrl)?,
            jwt_secret,
            cors_allowed_origin: env::get_optional(EnvKey::CorsAllowedOrigin),
            super_admin,
        })
    }
}

fn required(key: EnvKey) -> Result<String, ConfigError> {
    env::get_optional(key).ok_or(ConfigError::Missing(key.as_str()))
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("server_port", &self.server_port)
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .field("super_admin", &self.super_admin)
            .finish()
    }
}

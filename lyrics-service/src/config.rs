use std::env;

use anyhow::{Context, Result};
use common_auth::TokenConfig;

/// Service configuration loaded once from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Shared HS256 signing secret. Rotating it invalidates every
    /// previously issued token.
    pub jwt_secret: String,
    pub token: TokenConfig,
    pub allowed_origins: Vec<String>,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_env("PORT", 8080)?;

        let token = TokenConfig::new()
            .with_access_ttl(parse_env("ACCESS_TTL_SECONDS", 15 * 60)?)
            .with_refresh_ttl(parse_env("REFRESH_TTL_SECONDS", 7 * 24 * 60 * 60)?)
            .with_leeway(parse_env("JWT_LEEWAY_SECONDS", 0)?);

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();

        Ok(Self {
            host,
            port,
            jwt_secret,
            token,
            allowed_origins,
        })
    }
}

fn parse_env<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|err| anyhow::anyhow!("invalid {name}: {err}")),
        Err(_) => Ok(default),
    }
}

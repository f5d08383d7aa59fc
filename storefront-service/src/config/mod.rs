use crate::services::providers::gemini::GEMINI_API_BASE;
use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Upper bound on one upstream AI call, seconds. No retries follow a
/// failed attempt.
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/storefront.db";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(Config {
            common,
            database: DatabaseConfig {
                url: Secret::new(get_env("DATABASE_URL", Some(DEFAULT_DATABASE_URL), is_prod)?),
                max_connections: get_env("DATABASE_MAX_CONNECTIONS", Some("5"), is_prod)?
                    .parse()
                    .unwrap_or(5),
            },
            gemini: GeminiSettings {
                // Empty in dev: the service starts, chat requests fail upstream.
                api_key: Secret::new(get_env("GEMINI_API_KEY", Some(""), is_prod)?),
                model: get_env("GEMINI_MODEL", Some("gemini-2.0-flash"), is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(GEMINI_API_BASE), is_prod)?,
                timeout_secs: get_env(
                    "CHAT_UPSTREAM_TIMEOUT_SECS",
                    Some(&DEFAULT_UPSTREAM_TIMEOUT_SECS.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

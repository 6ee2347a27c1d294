use crate::gemini::DEFAULT_BASE_URL;
use dotenvy::dotenv;
use std::env;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid GEMINI_BASE_URL: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Secret behind the "API Default" slot; empty when not configured.
    pub api_key: String,
    pub base_url: Url,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if cfg!(not(test)) {
            let _ = dotenv();
        }

        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let base_url = match env::var("GEMINI_BASE_URL") {
            Ok(s) if !s.trim().is_empty() => parse_base_url(s.trim())?,
            _ => parse_base_url(DEFAULT_BASE_URL)?,
        };

        let port = match env::var("PORT") {
            Ok(s) if !s.trim().is_empty() => s
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(s.clone()))?,
            _ => 8080u16,
        };

        Ok(AppConfig {
            api_key,
            base_url,
            port,
        })
    }
}

// Url::join drops the last segment unless the base ends with '/'.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&with_slash).map_err(|_| ConfigError::InvalidBaseUrl(raw.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(url)
}

//! Backend location, read from the environment.
//!
//! Native builds load `.env` through `dotenvy` and read `BDMS_API_URL` at
//! runtime. Browser builds have no process environment, so the variable is
//! captured when the crate is compiled.

use reqwest::Url;

use crate::ApiError;

/// Environment variable holding the backend base URL.
pub const API_URL_VAR: &str = "BDMS_API_URL";

/// Used when `BDMS_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Absolute URL that every endpoint path is appended to. No trailing slash.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ApiError> {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');
        let url = Url::parse(trimmed).map_err(|e| ApiError::Config(format!("{trimmed}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("{trimmed}: not a base URL")));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Read the configuration for this platform.
    pub fn from_env() -> Result<Self, ApiError> {
        match env_api_url() {
            Some(url) if !url.trim().is_empty() => Self::new(url),
            _ => Ok(Self::default()),
        }
    }

    /// Like [`from_env`](Self::from_env) but falls back to the default URL.
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("{e}; using {DEFAULT_API_URL}");
            Self::default()
        })
    }

    pub fn url(&self) -> Result<Url, ApiError> {
        Url::parse(&self.base_url).map_err(|e| ApiError::Config(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_api_url() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(API_URL_VAR).ok()
}

#[cfg(target_arch = "wasm32")]
fn env_api_url() -> Option<String> {
    option_env!("BDMS_API_URL").map(str::to_string)
}

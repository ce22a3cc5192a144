use crate::utils::error::{ClientError, Result};
use std::env;

pub const PRICES_API_URL_ENV: &str = "PRICES_API_URL";
pub const PRICES_API_LOCAL_URL_ENV: &str = "PRICES_API_LOCAL_URL";

/// Prices backend location: a local override and a remote default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendConfig {
    pub local_url: Option<String>,
    pub remote_url: Option<String>,
}

impl BackendConfig {
    pub fn new(local_url: Option<String>, remote_url: Option<String>) -> Self {
        Self {
            local_url,
            remote_url,
        }
    }

    pub fn remote(url: impl Into<String>) -> Self {
        Self::new(None, Some(url.into()))
    }

    pub fn from_env() -> Self {
        Self {
            local_url: env::var(PRICES_API_LOCAL_URL_ENV).ok(),
            remote_url: env::var(PRICES_API_URL_ENV).ok(),
        }
    }

    /// 優先順序：本地 URL > 遠端 URL。空字串視為未設定。
    pub fn resolve(&self) -> Option<&str> {
        non_blank(&self.local_url).or_else(|| non_blank(&self.remote_url))
    }

    pub fn is_configured(&self) -> bool {
        self.resolve().is_some()
    }

    pub fn require(&self) -> Result<&str> {
        self.resolve().ok_or_else(|| ClientError::ConfigError {
            message: format!(
                "Prices API URL is not configured. Please set {} or {}",
                PRICES_API_URL_ENV, PRICES_API_LOCAL_URL_ENV
            ),
        })
    }
}

/// Whether a prices client could be built from `config`.
pub fn is_configured(config: &BackendConfig) -> bool {
    config.is_configured()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

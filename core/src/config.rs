//! Client configuration.
//!
//! Loaded from JSON (`from_json`) or from the environment (`from_env`);
//! anything left unset falls back to the defaults below.

use std::num::NonZeroU32;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";
pub const DEFAULT_PAGE_SIZE: u32 = 20;

pub const ENDPOINT_VAR: &str = "USERS_API_URL";
pub const PAGE_SIZE_VAR: &str = "USERS_PAGE_SIZE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: `{value}` is not a positive integer")]
    InvalidPageSize { var: &'static str, value: String },

    #[error("endpoint must not be empty")]
    EmptyEndpoint,

    #[error("malformed config: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub endpoint: String,
    pub page_size: NonZeroU32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = serde_json::from_str(raw)?;
        config.validated()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// `from_env` over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = ClientConfig::default();
        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            config.endpoint = endpoint;
        }
        if let Some(value) = lookup(PAGE_SIZE_VAR) {
            config.page_size = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPageSize { var: PAGE_SIZE_VAR, value })?;
        }
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.page_size.get(), 20);
    }

    #[test]
    fn env_overrides() {
        let config = ClientConfig::from_lookup(|var| match var {
            ENDPOINT_VAR => Some("http://api.test/graphql".to_string()),
            PAGE_SIZE_VAR => Some("50".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.endpoint, "http://api.test/graphql");
        assert_eq!(config.page_size.get(), 50);
    }

    #[test]
    fn zero_page_size_rejected() {
        let err = ClientConfig::from_lookup(|var| (var == PAGE_SIZE_VAR).then(|| "0".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPageSize { .. }));
    }

    #[test]
    fn json_partial_uses_defaults() {
        let config = ClientConfig::from_json(r#"{"pageSize":10}"#).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.page_size.get(), 10);
        assert!(ClientConfig::from_json(r#"{"pageSize":0}"#).is_err());
        assert!(matches!(ClientConfig::from_json(r#"{"endpoint":""}"#), Err(ConfigError::EmptyEndpoint)));
    }
}

//! Environment configuration
//!
//! | Variable             | Default | Meaning                                   |
//! |----------------------|---------|-------------------------------------------|
//! | `ESTATE_BACKEND_URL` | –       | Backend origin; requests go to `<url>/api` |
//! | `ESTATE_PAGE_SIZE`   | `12`    | Listings per page in the browse view      |
//! | `ESTATE_TOKEN`       | –       | Bearer token to start signed in           |
//!
//! A `.env` file in the working directory is read first, if present.

use crate::search::DEFAULT_PAGE_SIZE;
use std::env;
use thiserror::Error;
use tracing::{debug, info};

pub const BACKEND_URL_VAR: &str = "ESTATE_BACKEND_URL";
pub const PAGE_SIZE_VAR: &str = "ESTATE_PAGE_SIZE";
pub const TOKEN_VAR: &str = "ESTATE_TOKEN";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub backend_url: String,
    pub page_size: u32,
    pub token: Option<String>,
}

impl Config {
    /// Load from the process environment, after seeding it from `.env`
    pub fn load() -> Result<Self, ConfigError> {
        if dotenv::dotenv().is_ok() {
            debug!("Loaded .env file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let backend_url = var(BACKEND_URL_VAR).ok_or(ConfigError::Missing(BACKEND_URL_VAR))?;
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: BACKEND_URL_VAR,
                value: backend_url,
                reason: "expected an http(s) origin".to_string(),
            });
        }

        let page_size = match var(PAGE_SIZE_VAR) {
            Some(raw) => parse_page_size(&raw)?,
            None => {
                info!("{PAGE_SIZE_VAR} not set, using default: {DEFAULT_PAGE_SIZE}");
                DEFAULT_PAGE_SIZE
            }
        };

        Ok(Self {
            backend_url,
            page_size,
            token: var(TOKEN_VAR),
        })
    }
}

fn parse_page_size(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: PAGE_SIZE_VAR,
        value: raw.to_string(),
        reason,
    };

    let size: u32 = raw.parse().map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
    if size == 0 {
        return Err(invalid("must be at least 1".to_string()));
    }
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[(BACKEND_URL_VAR, "http://localhost:8001")]))
            .unwrap();
        assert_eq!(config.backend_url, "http://localhost:8001");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_all_values() {
        let config = Config::from_lookup(lookup(&[
            (BACKEND_URL_VAR, " https://homes.example.com "),
            (PAGE_SIZE_VAR, "24"),
            (TOKEN_VAR, "tok"),
        ]))
        .unwrap();
        assert_eq!(config.backend_url, "https://homes.example.com");
        assert_eq!(config.page_size, 24);
        assert_eq!(config.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_missing_backend() {
        assert_eq!(
            Config::from_lookup(lookup(&[(BACKEND_URL_VAR, "  ")])),
            Err(ConfigError::Missing(BACKEND_URL_VAR))
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[(BACKEND_URL_VAR, "localhost:8001")])),
            Err(ConfigError::Invalid { key: BACKEND_URL_VAR, .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[
                (BACKEND_URL_VAR, "http://localhost"),
                (PAGE_SIZE_VAR, "0")
            ])),
            Err(ConfigError::Invalid { key: PAGE_SIZE_VAR, .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[
                (BACKEND_URL_VAR, "http://localhost"),
                (PAGE_SIZE_VAR, "twelve")
            ])),
            Err(ConfigError::Invalid { key: PAGE_SIZE_VAR, .. })
        ));
    }
}

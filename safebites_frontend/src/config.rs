use std::env;

use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/extract";
pub const ENDPOINT_ENV: &str = "SAFEBITES_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        match env::var(ENDPOINT_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::with_endpoint(raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self> {
        Ok(Self {
            endpoint: sanitize_endpoint(endpoint.into())?,
        })
    }
}

pub(crate) fn sanitize_endpoint(raw: String) -> Result<String> {
    let mut endpoint = raw.trim().to_string();
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        endpoint = format!("http://{endpoint}");
    }
    while endpoint.ends_with('/') {
        endpoint.pop();
    }
    let _ = Url::parse(&endpoint).with_context(|| format!("invalid endpoint URL {endpoint:?}"))?;
    Ok(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_local_extract() {
        assert_eq!(ClientConfig::default().endpoint, "http://127.0.0.1:5000/extract");
    }

    #[test]
    fn sanitizes_scheme_and_slashes() {
        let config = ClientConfig::with_endpoint(" 10.0.0.2:5000/extract// ").unwrap();
        assert_eq!(config.endpoint, "http://10.0.0.2:5000/extract");
        let config = ClientConfig::with_endpoint("https://scan.example/extract").unwrap();
        assert_eq!(config.endpoint, "https://scan.example/extract");
    }

    #[test]
    fn rejects_garbage() {
        assert!(ClientConfig::with_endpoint("http://exa mple:99999").is_err());
    }
}

//! Places client configuration.
//!
//! Environment variables:
//! - `GOOGLE_MAP_API`: API key sent with every request
//! - `PLACES_API_BASE_URL`: Service root (default: `https://maps.googleapis.com/maps/api/place`)
//! - `PLACES_LANGUAGE`: Response language (default: `ja`)
//! - `PLACES_TIMEOUT_SEC`: Request timeout in seconds (default: 10)

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacesConfig {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub timeout_sec: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: "ja".to_string(),
            timeout_sec: 10,
        }
    }
}

impl PlacesConfig {
    /// Read the configuration from the environment, falling back to defaults.
    ///
    /// A missing API key is not an error here; requests will simply be
    /// rejected by the service.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("GOOGLE_MAP_API").unwrap_or_default(),
            base_url: std::env::var("PLACES_API_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            language: std::env::var("PLACES_LANGUAGE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.language),
            timeout_sec: std::env::var("PLACES_TIMEOUT_SEC")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_sec),
        }
    }

    /// Configuration pointing at an alternate service root, e.g. a mock server.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

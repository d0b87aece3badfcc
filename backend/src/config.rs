//! Process-level configuration read from the environment.
//!
//! - `HOST`: Bind address (default: `0.0.0.0`)
//! - `PORT`: Listen port (default: 8080)
//! - `DISPLAY_UTC_OFFSET_HOURS`: Offset used to render place datetimes (default: 9, Japan)

use chrono::{FixedOffset, Offset, Utc};

pub const DEFAULT_DISPLAY_OFFSET_HOURS: i32 = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub display_utc_offset_hours: i32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            display_utc_offset_hours: DEFAULT_DISPLAY_OFFSET_HOURS,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            display_utc_offset_hours: std::env::var("DISPLAY_UTC_OFFSET_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .filter(|h: &i32| (-23..=23).contains(h))
                .unwrap_or(defaults.display_utc_offset_hours),
        }
    }

    /// `host:port` for binding; `host` may be a name such as `localhost`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn display_offset(&self) -> FixedOffset {
        display_offset(self.display_utc_offset_hours)
    }
}

/// Fixed offset for `hours` east of UTC; out-of-range values fall back to UTC+9.
pub fn display_offset(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours.saturating_mul(3600))
        .or_else(|| FixedOffset::east_opt(DEFAULT_DISPLAY_OFFSET_HOURS * 3600))
        .unwrap_or_else(|| Utc.fix())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.display_offset().local_minus_utc(), 9 * 3600);
    }

    #[tokio::test]
    async fn test_bind_addr_accepts_host_names() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            port: 0,
            ..Default::default()
        };
        let listener = tokio::net::TcpListener::bind(config.bind_addr()).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[test]
    fn test_display_offset_out_of_range() {
        assert_eq!(display_offset(-5).local_minus_utc(), -5 * 3600);
        assert_eq!(display_offset(40).local_minus_utc(), 9 * 3600);
    }
}

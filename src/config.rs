//! Application configuration
//!
//! `item-pager` reads a YAML file whose fields all have defaults; command
//! line flags override individual values after loading.

use crate::error::{Error, Result};
use crate::fetcher::DEFAULT_RESOURCE;
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pager::{PagingConfig, DEFAULT_PAGE_SIZE};
use crate::types::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for fetching and paging items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Base URL of the REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collection resource under the base URL
    #[serde(default = "default_resource")]
    pub resource: String,

    /// Records per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Whole-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Prefetch distance in items (defaults to the page size)
    #[serde(default)]
    pub prefetch_distance: Option<usize>,

    /// Client-side rate limit; unlimited when absent
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    /// Dotted path to the record array when the API wraps it in an object
    #[serde(default)]
    pub record_path: Option<String>,

    /// Where preferences are persisted
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,

    /// Log level when `RUST_LOG` is unset
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            resource: default_resource(),
            page_size: default_page_size(),
            timeout_ms: default_timeout_ms(),
            prefetch_distance: None,
            requests_per_second: None,
            record_path: None,
            preferences_path: default_preferences_path(),
            log_level: LogLevel::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.punkapi.com/v2".to_string()
}

fn default_resource() -> String {
    DEFAULT_RESOURCE.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("item-pager-preferences.json")
}

impl AppConfig {
    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and that the base URL parses
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than zero"));
        }
        if self.timeout_ms == 0 {
            return Err(Error::invalid_value("timeout_ms", "must be greater than zero"));
        }
        if self.requests_per_second == Some(0) {
            return Err(Error::invalid_value(
                "requests_per_second",
                "must be greater than zero",
            ));
        }
        if self.resource.trim_matches('/').is_empty() {
            return Err(Error::invalid_value("resource", "must not be empty"));
        }

        let url = url::Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        Ok(())
    }

    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// HTTP client settings derived from this config
    pub fn http_client_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(self.timeout());
        let builder = match self.requests_per_second {
            Some(rps) => builder.rate_limit(RateLimiterConfig::per_second(rps)),
            None => builder.no_rate_limit(),
        };
        builder.build()
    }

    /// Pager settings derived from this config
    pub fn paging_config(&self) -> PagingConfig {
        let config = PagingConfig::new(self.page_size);
        match self.prefetch_distance {
            Some(distance) => config.with_prefetch_distance(distance),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.resource, "items");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.timeout_ms, 1000);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = AppConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
base_url: "https://api.example.com/v1"
resource: beers
page_size: 50
timeout_ms: 2500
prefetch_distance: 10
requests_per_second: 4
record_path: "$.data"
preferences_path: /tmp/prefs.json
log_level: debug
"#;

        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.resource, "beers");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert_eq!(config.record_path.as_deref(), Some("$.data"));
        assert_eq!(config.log_level, LogLevel::Debug);

        let paging = config.paging_config();
        assert_eq!(paging.page_size, 50);
        assert_eq!(paging.prefetch_distance, 10);

        let http = config.http_client_config();
        assert_eq!(http.timeout, Duration::from_millis(2500));
        assert_eq!(http.rate_limit, Some(RateLimiterConfig::per_second(4)));
    }

    #[test]
    fn test_prefetch_defaults_to_page_size() {
        let config = AppConfig::from_yaml_str("page_size: 15").unwrap();
        assert_eq!(config.paging_config().prefetch_distance, 15);
        assert!(config.http_client_config().rate_limit.is_none());
    }

    #[test]
    fn test_validation_errors() {
        let err = AppConfig::from_yaml_str("page_size: 0").unwrap_err();
        assert!(err.to_string().contains("page_size"));

        let err = AppConfig::from_yaml_str("timeout_ms: 0").unwrap_err();
        assert!(err.to_string().contains("timeout_ms"));

        let err = AppConfig::from_yaml_str("requests_per_second: 0").unwrap_err();
        assert!(err.to_string().contains("requests_per_second"));

        let err = AppConfig::from_yaml_str("base_url: \"not a url\"").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = AppConfig::from_yaml_str("base_url: \"ftp://example.com\"").unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = AppConfig::from_yaml_str("page_sise: 10").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size: 5").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_from_missing_file() {
        let err = AppConfig::from_file("/nonexistent/item-pager.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}

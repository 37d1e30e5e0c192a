//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::errors::{RelayError, Result};

/// Public relay the probes talk to by default
pub const DEFAULT_RELAY_URL: &str = "https://translate-relay.brave.com";

/// Host serving the translate widget assets
pub const DEFAULT_WIDGET_HOST: &str = "https://translate.googleapis.com/";

/// Directory the widget assets are written to and served from
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Relay server listen port
pub const DEFAULT_PORT: u16 = 8195;

/// Configuration for the relay server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Bearer token sent to every Lingvanex endpoint
    pub api_key: String,
    /// Lingvanex endpoint base URLs
    pub endpoints: Vec<String>,
    /// Default weight of each endpoint
    pub weights: Vec<f64>,
    /// Upstream request timeout
    pub timeout_ms: u64,
    /// Root of the fetched widget assets
    pub assets_dir: PathBuf,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoints: vec![],
            weights: vec![],
            timeout_ms: 60000,
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
        }
    }
}

impl RelayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let hosts = std::env::var("LNX_HOST").map_err(|_| RelayError::ConfigError {
            message: "LNX_HOST environment variable is required".to_string(),
        })?;
        let endpoints = parse_endpoints(&hosts);

        let weights = parse_weights(&std::env::var("LNX_WEIGHTS").unwrap_or_default())?;
        let weights = default_weights(&endpoints, weights);

        let api_key = std::env::var("LNX_API_KEY").unwrap_or_default();

        let timeout_ms = std::env::var("LNX_TIMEOUT_MS")
            .unwrap_or_else(|_| "60000".to_string())
            .parse::<u64>()
            .map_err(|e| RelayError::ConfigError {
                message: format!("LNX_TIMEOUT_MS: {}", e),
            })?;

        let assets_dir = std::env::var("ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_ASSETS_DIR));

        let config = Self {
            api_key,
            endpoints,
            weights,
            timeout_ms,
            assets_dir,
        };
        info!("Loaded relay config with {} endpoints", config.endpoints.len());
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.endpoints.is_empty() {
            return Err(RelayError::ConfigError {
                message: "must pass at least one endpoint via LNX_HOST".to_string(),
            });
        }

        for endpoint in &self.endpoints {
            url::Url::parse(endpoint).map_err(|e| RelayError::ConfigError {
                message: format!("invalid endpoint {}: {}", endpoint, e),
            })?;
        }

        if self.endpoints.len() != self.weights.len() {
            return Err(RelayError::ConfigError {
                message: format!(
                    "got {} endpoints but {} weights via LNX_WEIGHTS",
                    self.endpoints.len(),
                    self.weights.len()
                ),
            });
        }

        if self.weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(RelayError::ConfigError {
                message: "weights must be non-negative numbers".to_string(),
            });
        }

        if self.timeout_ms == 0 {
            return Err(RelayError::ConfigError {
                message: "timeout_ms must be greater than 0".to_string(),
            });
        }

        if self.api_key.is_empty() {
            warn!("LNX_API_KEY is not set, upstream requests will be unauthenticated");
        }

        Ok(())
    }
}

/// Split a comma separated endpoint list, dropping blanks and trailing slashes
pub fn parse_endpoints(hosts: &str) -> Vec<String> {
    hosts
        .split(',')
        .map(|h| h.trim().trim_end_matches('/'))
        .filter(|h| !h.is_empty())
        .map(|h| h.to_string())
        .collect()
}

/// Parse a comma separated weight list, skipping empty items
pub fn parse_weights(weights: &str) -> Result<Vec<f64>> {
    weights
        .split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|w| {
            w.parse::<f64>().map_err(|e| RelayError::ConfigError {
                message: format!(
                    "must pass at least one endpoint via LNX_HOST and one weight via LNX_WEIGHTS: {}",
                    e
                ),
            })
        })
        .collect()
}

/// A lone endpoint without a weight gets weight 1
fn default_weights(endpoints: &[String], weights: Vec<f64>) -> Vec<f64> {
    if endpoints.len() == 1 && weights.is_empty() {
        vec![1.0]
    } else {
        weights
    }
}

/// Configuration for the relay probes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Relay base URL
    pub relay_url: String,
    /// Per request timeout
    pub timeout_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            timeout_ms: 5000,
        }
    }
}

impl ProbeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            relay_url: std::env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string()),
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.relay_url)?;
        if self.timeout_ms == 0 {
            return Err(RelayError::ConfigError {
                message: "timeout_ms must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// How asset downloads are performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FetchBackend {
    /// Spawn the external `curl` tool per asset
    #[default]
    Curl,
    /// Download in process with reqwest
    Http,
}

/// Configuration for the asset fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Host the widget assets are downloaded from
    pub widget_host: String,
    /// Root directory, assets land under `<root>/static/<version>/`
    pub out_root: PathBuf,
    /// Download backend
    pub backend: FetchBackend,
    /// Per asset timeout
    pub timeout_ms: u64,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            widget_host: DEFAULT_WIDGET_HOST.to_string(),
            out_root: PathBuf::from(DEFAULT_ASSETS_DIR),
            backend: FetchBackend::default(),
            timeout_ms: 30000,
        }
    }
}

impl AssetConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.widget_host)?;
        if self.timeout_ms == 0 {
            return Err(RelayError::ConfigError {
                message: "timeout_ms must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relay_config(endpoints: &[&str], weights: Vec<f64>) -> RelayConfig {
        RelayConfig {
            api_key: "test_key".to_string(),
            endpoints: endpoints.iter().map(|e| e.to_string()).collect(),
            weights,
            ..Default::default()
        }
    }

    #[test]
    fn test_config_validation() {
        let config = relay_config(&["http://lnx-1:8080", "http://lnx-2:8080"], vec![0.7, 0.3]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_missing_endpoints() {
        let config = relay_config(&[], vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_weight_mismatch() {
        let config = relay_config(&["http://lnx-1:8080", "http://lnx-2:8080"], vec![1.0]);
        assert!(config.validate().is_err());

        let config = relay_config(&["http://lnx-1:8080"], vec![-1.0]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_url() {
        let config = relay_config(&["not a url"], vec![1.0]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_endpoints() {
        assert_eq!(
            parse_endpoints("http://a:1/, http://b:2,,"),
            vec!["http://a:1", "http://b:2"]
        );
        assert!(parse_endpoints("").is_empty());
    }

    #[test]
    fn test_parse_weights() {
        assert_eq!(parse_weights("0.5,0.25,").unwrap(), vec![0.5, 0.25]);
        assert!(parse_weights("").unwrap().is_empty());
        assert!(parse_weights("heavy").is_err());
    }

    #[test]
    fn test_single_endpoint_defaults_to_unit_weight() {
        let endpoints = vec!["http://a".to_string()];
        assert_eq!(default_weights(&endpoints, vec![]), vec![1.0]);
        assert_eq!(default_weights(&endpoints, vec![0.2]), vec![0.2]);

        let endpoints = vec!["http://a".to_string(), "http://b".to_string()];
        assert!(default_weights(&endpoints, vec![]).is_empty());
    }

    #[test]
    fn test_relay_default_ignores_environment() {
        std::env::set_var("LNX_API_KEY", "from-env");
        let config = RelayConfig::default();
        assert!(config.api_key.is_empty());
        assert!(config.endpoints.is_empty());
        assert_eq!(config.timeout_ms, 60000);
    }

    #[test]
    fn test_probe_and_asset_defaults() {
        let probe = ProbeConfig::default();
        assert_eq!(probe.timeout_ms, 5000);
        assert!(probe.validate().is_ok());

        let assets = AssetConfig::default();
        assert_eq!(assets.backend, FetchBackend::Curl);
        assert!(assets.validate().is_ok());
    }
}

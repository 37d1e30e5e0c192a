//! Async client for the Lingvanex translation backends

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::config::RelayConfig;
use crate::core::errors::{RelayError, Result};
use crate::core::language::to_google_language_list;
use crate::core::models::{GoogleLanguageList, LnxTranslateRequest};

const LANGUAGE_PATH: &str = "/get-languages";
const TRANSLATE_PATH: &str = "/translate";

/// Raw upstream reply, passed back to the widget mostly untouched
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// HTTP status code
    pub status: u16,
    /// Upstream `Content-Type`, if any
    pub content_type: Option<String>,
    /// Response body
    pub body: Vec<u8>,
}

impl UpstreamResponse {
    /// Whether upstream answered 200 OK
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Lingvanex client shared by all request handlers
#[derive(Debug, Clone)]
pub struct LnxClient {
    client: reqwest::Client,
    config: Arc<RelayConfig>,
}

impl LnxClient {
    /// Create a new client
    pub fn new(config: RelayConfig) -> Result<Self> {
        config.validate()?;

        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = RelayConfig::from_env()?;
        Self::new(config)
    }

    /// Configuration the client was built with
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.config.api_key)
    }

    /// Fetch an endpoint's language list and convert it to Google format
    pub async fn get_language_list(&self, endpoint: &str) -> Result<GoogleLanguageList> {
        let url = format!("{}{}", endpoint, LANGUAGE_PATH);
        debug!("Fetching language list from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.bearer())
            .send()
            .await
            .map_err(|e| RelayError::NetworkError {
                message: format!("error sending request to Lnx server: {}", e),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| RelayError::NetworkError {
            message: format!("error reading Lnx response body: {}", e),
        })?;

        if !status.is_success() {
            return Err(RelayError::ApiError {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        to_google_language_list(&body)
    }

    /// Fetch every configured endpoint's language list, in endpoint order
    pub async fn get_language_lists(&self) -> Result<Vec<GoogleLanguageList>> {
        let mut lists = Vec::with_capacity(self.config.endpoints.len());
        for endpoint in &self.config.endpoints {
            let list = self.get_language_list(endpoint).await.map_err(|e| {
                warn!("Language list from {} failed: {}", endpoint, e);
                e
            })?;
            lists.push(list);
        }
        Ok(lists)
    }

    /// Send a translate request to one endpoint.
    ///
    /// Non-200 replies are returned as is; only transport failures are errors.
    pub async fn translate(
        &self,
        endpoint: &str,
        request: &LnxTranslateRequest,
    ) -> Result<UpstreamResponse> {
        let url = format!("{}{}", endpoint, TRANSLATE_PATH);
        debug!("Forwarding {} texts to {}", request.data.len(), url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.bearer())
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::NetworkError {
                message: format!("error sending request to LnxEndpoint: {}", e),
            })?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let body = response.bytes().await.map_err(|e| RelayError::NetworkError {
            message: format!("Error reading LnxEndpoint response body: {}", e),
        })?;

        if status != 200 {
            warn!("Upstream {} answered {}", endpoint, status);
        }

        Ok(UpstreamResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

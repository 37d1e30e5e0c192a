//! One-shot requests against a translation relay

use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, info};

use crate::core::config::ProbeConfig;
use crate::core::errors::{RelayError, Result};
use crate::probes::samples::ProbePayload;

/// Client for the relay's `translate` and `language` endpoints.
///
/// Each call sends exactly one request and hands back the raw body.
#[derive(Debug, Clone)]
pub struct RelayProbe {
    client: reqwest::Client,
    config: ProbeConfig,
}

/// Headers every probe request carries
pub fn probe_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded"),
    );
    headers.insert("charset", HeaderValue::from_static("utf-8"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers
}

impl RelayProbe {
    /// Create a new probe
    pub fn new(config: ProbeConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .default_headers(probe_headers())
            .build()?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.relay_url.trim_end_matches('/'), path)
    }

    /// POST the payload to `/translate` and return the raw response body
    pub async fn translate(&self, payload: &ProbePayload) -> Result<Vec<u8>> {
        let url = self.url("translate");
        info!(
            "POST {} sl={} tl={} with {} texts",
            url,
            payload.sl,
            payload.tl,
            payload.texts.len()
        );

        let request = self
            .client
            .post(&url)
            .query(&[("sl", payload.sl.as_str()), ("tl", payload.tl.as_str())])
            .body(form_body(payload));

        self.send(request).await
    }

    /// GET `/language` and return the raw response body
    pub async fn language(&self) -> Result<Vec<u8>> {
        let url = self.url("language");
        info!("GET {}", url);
        self.send(self.client.get(&url)).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send().await.map_err(|e| RelayError::NetworkError {
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!("Relay answered {} with {} bytes", status, body.len());

        if !status.is_success() {
            return Err(RelayError::ApiError {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }
}

/// Form-urlencoded body with one `q` per sentence
fn form_body(payload: &ProbePayload) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(payload.form_fields())
        .finish()
}

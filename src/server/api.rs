//! HTTP relay server implementation

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::core::client::LnxClient;
use crate::core::config::RelayConfig;
use crate::core::endpoints::EndpointConfiguration;
use crate::core::errors::Result;
use crate::core::models::{
    to_google_response_body, GoogleLanguageList, LnxTranslateRequest, TranslateParams,
};
use crate::core::usage_tracker::UsageTracker;
use crate::server::static_files::static_routes;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const LNX_ERROR_PREFIX: &[u8] = b"LNX-ERROR:\n";

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    client: Arc<LnxClient>,
    endpoints: Arc<EndpointConfiguration>,
    usage: UsageTracker,
}

impl AppState {
    /// Assemble state from an upstream client and a ready endpoint configuration
    pub fn new(client: LnxClient, endpoints: EndpointConfiguration) -> Self {
        Self {
            client: Arc::new(client),
            endpoints: Arc::new(endpoints),
            usage: UsageTracker::new(),
        }
    }

    /// Ask every endpoint for its languages and build the weighted configuration
    pub async fn connect(config: RelayConfig) -> Result<Self> {
        let client = LnxClient::new(config)?;
        let lists = client.get_language_lists().await?;
        let endpoints = EndpointConfiguration::new(
            client.config().endpoints.clone(),
            client.config().weights.clone(),
            lists,
        )?;
        Ok(Self::new(client, endpoints))
    }

    /// Usage counters
    pub fn usage(&self) -> &UsageTracker {
        &self.usage
    }

    /// Endpoint configuration in use
    pub fn endpoints(&self) -> &EndpointConfiguration {
        &self.endpoints
    }
}

/// Liveness check
async fn heartbeat() -> &'static str {
    "."
}

/// Merged language list of all endpoints, Google format
async fn get_language_list(State(state): State<Arc<AppState>>) -> Json<GoogleLanguageList> {
    Json(state.endpoints.language_pair_list.clone())
}

/// Usage counters in Prometheus text format
async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.usage.render_prometheus().await,
    )
}

/// All values of `key` in a form-urlencoded body, in order
fn form_values(body: &[u8], key: &str) -> Vec<String> {
    url::form_urlencoded::parse(body)
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}

/// Translate a Google format request through a Lingvanex endpoint
async fn translate(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Response> {
    let params = TranslateParams::from_query(query.as_deref().unwrap_or_default())?;
    let texts = form_values(&body, "q");

    let request = LnxTranslateRequest::from_google(&params, texts)?;
    // only validated language codes become metric labels
    state
        .usage
        .record_request(&params.sl, &params.tl, &request.data)
        .await;

    let endpoint = state.endpoints.select_endpoint(&params.sl, &params.tl);
    debug!("Routing {} -> {} to {}", params.sl, params.tl, endpoint);

    let upstream = state.client.translate(endpoint, &request).await?;

    if !upstream.is_ok() {
        let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
        let content_type = content_type_or(upstream.content_type.as_deref(), "text/plain; charset=utf-8");
        let mut body = LNX_ERROR_PREFIX.to_vec();
        body.extend_from_slice(&upstream.body);
        return Ok((status, [(header::CONTENT_TYPE, content_type)], body).into_response());
    }

    let content_type = content_type_or(upstream.content_type.as_deref(), "application/json");
    let body = to_google_response_body(&upstream.body)?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response())
}

/// Upstream content type when it is a valid header value, `fallback` otherwise
fn content_type_or(upstream: Option<&str>, fallback: &'static str) -> HeaderValue {
    upstream
        .and_then(|v| HeaderValue::from_str(v).ok())
        .unwrap_or_else(|| HeaderValue::from_static(fallback))
}

/// Build the relay router
pub fn build_router(state: Arc<AppState>, assets_root: &Path) -> Router {
    let translate_routes = Router::new()
        .route("/translate_a/t", post(translate))
        .route("/translate", post(translate))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ));

    Router::new()
        .route("/", get(heartbeat))
        .route("/translate_a/l", get(get_language_list))
        .route("/language", get(get_language_list))
        .route("/metrics", get(get_metrics))
        .merge(translate_routes)
        .merge(static_routes(assets_root))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Run the HTTP server
pub async fn run_server(config: RelayConfig, host: String, port: u16) -> anyhow::Result<()> {
    let assets_dir = config.assets_dir.clone();

    let state = AppState::connect(config).await?;
    info!(
        "Relaying to {} endpoints, {} source languages",
        state.endpoints.endpoints.len(),
        state.endpoints.language_pair_list.sl.len()
    );

    let app = build_router(Arc::new(state), &assets_dir);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_values() {
        let body = b"q=guten%20Abend&q=Hallo%20Welt&client=te_lib";
        assert_eq!(form_values(body, "q"), vec!["guten Abend", "Hallo Welt"]);
        assert!(form_values(b"", "q").is_empty());
    }

    #[test]
    fn test_content_type_fallback() {
        assert_eq!(
            content_type_or(Some("application/json; charset=utf-8"), "text/plain"),
            "application/json; charset=utf-8"
        );
        assert_eq!(content_type_or(None, "application/json"), "application/json");
        assert_eq!(content_type_or(Some("bad\nvalue"), "text/plain"), "text/plain");
    }
}

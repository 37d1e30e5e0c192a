//! Serving the fetched widget assets

use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use std::path::Path;
use tower_http::services::ServeFile;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::assets::catalog::ASSETS;

/// Headers attached to every static asset response
pub fn static_headers() -> [(HeaderName, HeaderValue); 6] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("require-trusted-types-for 'script'"),
        ),
        (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (
            HeaderName::from_static("cross-origin-opener-policy"),
            HeaderValue::from_static("same-origin"),
        ),
        (header::CACHE_CONTROL, HeaderValue::from_static("max-age=86400")),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
    ]
}

/// One route per catalog asset, each backed by its file below `assets_root`.
/// Nothing else under the assets directory is reachable.
pub fn static_routes<S>(assets_root: &Path) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let mut router = Router::new();
    for asset in ASSETS {
        router = router.route_service(&asset.route(), ServeFile::new(asset.output_path(assets_root)));
    }

    for (name, value) in static_headers() {
        router = router.layer(SetResponseHeaderLayer::overriding(name, value));
    }
    router
}

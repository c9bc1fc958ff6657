// Webring - Proxy Server
// Forwards /webring to the upstream spreadsheet-backed API for a single
// allowed origin, with 60s caching at the edge and client layers

use axum::{
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::env;
use tracing::{error, info, warn};

const CDN_CACHE_CONTROL: HeaderName = HeaderName::from_static("cdn-cache-control");
const CACHE_POLICY: &str = "public, max-age=60";

/// Shared application state
#[derive(Clone)]
struct AppState {
    allowed_origin: String,
    upstream_url: Option<String>,
    client: reqwest::Client,
}

/// Classify the request's Origin header against the single allowed origin.
/// Absent origins (curl, same-origin navigations) are allowed; any foreign
/// origin is explicitly forbidden.
fn origin_allowed(headers: &HeaderMap, allowed: &str) -> bool {
    match headers.get(header::ORIGIN).and_then(|v| v.to_str().ok()) {
        Some(origin) => origin == allowed,
        None => true,
    }
}

/// OPTIONS /webring - CORS preflight for the allowed origin only
async fn preflight(
    axum::extract::State(state): axum::extract::State<AppState>,
    headers: HeaderMap,
) -> Response {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if origin == state.allowed_origin {
        (
            StatusCode::NO_CONTENT,
            [
                (
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    state.allowed_origin.clone(),
                ),
                (
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    "GET, OPTIONS".to_string(),
                ),
                (
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    "Content-Type".to_string(),
                ),
            ],
        )
            .into_response()
    } else {
        warn!(origin, "preflight rejected");
        (StatusCode::FORBIDDEN, "Forbidden").into_response()
    }
}

/// GET /webring - relay the upstream payload with cache headers
async fn proxy_webring(
    axum::extract::State(state): axum::extract::State<AppState>,
    headers: HeaderMap,
) -> Response {
    if !origin_allowed(&headers, &state.allowed_origin) {
        warn!("request rejected: foreign origin");
        return (StatusCode::FORBIDDEN, "Forbidden").into_response();
    }

    // Missing upstream configuration is a server-side fault, not a client one
    let Some(upstream_url) = state.upstream_url.as_deref() else {
        error!("UPSTREAM_URL env var is not set");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Missing UPSTREAM_URL env var",
        )
            .into_response();
    };

    let upstream = match state.client.get(upstream_url).send().await {
        Ok(upstream) => upstream,
        Err(e) => {
            error!("upstream fetch failed: {}", e);
            return (StatusCode::BAD_GATEWAY, "Upstream fetch failed").into_response();
        }
    };

    // Relay body and status as-is; reqwest and axum use different http
    // crate versions, so the status goes through its u16 form
    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body = match upstream.text().await {
        Ok(body) => body,
        Err(e) => {
            error!("upstream body read failed: {}", e);
            return (StatusCode::BAD_GATEWAY, "Upstream fetch failed").into_response();
        }
    };

    info!(status = status.as_u16(), bytes = body.len(), "relayed upstream response");

    (
        status,
        [
            (
                header::CONTENT_TYPE,
                "application/json; charset=utf-8".to_string(),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                state.allowed_origin.clone(),
            ),
            (header::CACHE_CONTROL, CACHE_POLICY.to_string()),
            (CDN_CACHE_CONTROL, CACHE_POLICY.to_string()),
        ],
        body,
    )
        .into_response()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webring_proxy=info".into()),
        )
        .init();

    let allowed_origin =
        env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| "https://cswebring.netlify.app".to_string());
    let upstream_url = env::var("UPSTREAM_URL").ok();
    if upstream_url.is_none() {
        // Reported per-request as a 500, same as the original function runtime
        warn!("UPSTREAM_URL is not set; /webring will return 500");
    }

    let state = AppState {
        allowed_origin,
        upstream_url,
        client: reqwest::Client::new(),
    };

    let app = Router::new()
        .route("/webring", get(proxy_webring).options(preflight))
        .with_state(state);

    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!("proxy listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

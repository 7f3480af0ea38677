//! Application router builder.
//!
//! [`build_router`] is shared by `main.rs` and the integration tests so both
//! run the same middleware stack.

use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::http::{HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServerConfig;
use crate::server::handlers;
use crate::server::state::AppState;

/// Build the full application [`Router`].
///
/// Middleware, outermost first:
///
/// 1. CORS
/// 2. Request logging (method, path, status, latency)
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/generate-script", post(handlers::script::generate))
        .route("/generate-voice", post(handlers::voice::generate))
        .layer(middleware::from_fn(log_requests))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// Build the CORS layer.  No configured origins means any origin, which is
/// what the browser frontend on the LAN needs.  Origins that fail to parse
/// are logged and skipped.
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    if config.cors_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(e) => {
                log::warn!("Ignoring invalid CORS origin {o:?}: {e}");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    log::info!(
        "{method} {path} -> {} ({} ms)",
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

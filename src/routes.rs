//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`            - Create (or return) a short URL
//! - `GET  /{token}`            - Short link redirect
//! - `GET  /analytics/{token}`  - Click count for a short link
//! - `GET  /health`             - Liveness and version
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive, the service is a public API
//! - **Rate limiting** - Global fixed-window policy on every route,
//!   a stricter one stacked on `POST /shorten`
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{analytics_handler, health_handler, redirect_handler, shorten_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The wildcard redirect route is registered last so the literal routes
/// win; axum picks the more specific path either way. The global rate
/// limit layer wraps the whole router and therefore runs before the
/// per-route shorten layer.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let shorten_route = Router::new()
        .route("/shorten", post(shorten_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::shorten_layer,
        ));

    let router = Router::new()
        .merge(shorten_route)
        .route("/analytics/{token}", get(analytics_handler))
        .route("/health", get(health_handler))
        .route("/{token}", get(redirect_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::global_layer,
        ))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

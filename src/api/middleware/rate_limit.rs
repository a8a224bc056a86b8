//! Fixed-window rate limiting middleware.
//!
//! Two policies protect the service:
//!
//! - **global**: applied to every route, evaluated first
//! - **shorten**: applied to `POST /shorten` on top of the global policy
//!
//! Counters are keyed by client identity, see
//! [`crate::utils::client_ip::client_identity`] for how that is resolved.
//! Requests over quota receive `429 Too Many Requests` with a `Retry-After`
//! header and a body naming the exhausted policy.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::application::rate_limiter::{Decision, RatePolicy};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_identity;

/// Middleware enforcing the global policy on every route.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/{token}", get(redirect_handler))
///     .layer(middleware::from_fn_with_state(state, rate_limit::global_layer));
/// ```
pub async fn global_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = client_identity(req.headers(), req.extensions(), state.behind_proxy);

    check(
        &state,
        &identity,
        &state.rate_policies.global,
        "Too many requests from this IP, please try again later.",
    )?;

    Ok(next.run(req).await)
}

/// Middleware enforcing the stricter shorten policy.
///
/// Layered onto the shorten route only, after the global policy has
/// already admitted the request.
pub async fn shorten_layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = client_identity(req.headers(), req.extensions(), state.behind_proxy);

    check(
        &state,
        &identity,
        &state.rate_policies.shorten,
        "Too many URL shorten requests from this IP, please try again later.",
    )?;

    Ok(next.run(req).await)
}

fn check(
    state: &AppState,
    identity: &str,
    policy: &RatePolicy,
    message: &str,
) -> Result<(), AppError> {
    match state.limiter.admit(identity, policy) {
        Decision::Allowed { .. } => Ok(()),
        Decision::Rejected { retry_after } => {
            tracing::warn!(
                identity,
                policy = policy.name,
                retry_after_ms = retry_after.as_millis() as u64,
                "rate limit exceeded"
            );

            Err(AppError::rate_limited(
                message,
                json!({
                    "policy": policy.name,
                    "quota": policy.quota,
                    "windowSecs": policy.window.as_secs(),
                }),
                retry_after,
            ))
        }
    }
}

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::Response;

use super::error::ApiError;
use super::state::ApiState;

const LIST_POSTS_PATH: &str = "/api/posts";

/// Rate-limit the list endpoint per client address. Other routes pass
/// through untouched.
pub async fn list_rate_limit(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::GET && request.uri().path() == LIST_POSTS_PATH {
        let key = client_key(&request);
        if !state.rate_limiter.allow(&key) {
            return ApiError::rate_limited(state.rate_limiter.retry_after_secs());
        }
    }

    next.run(request).await
}

fn client_key(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod rate_limit;
pub mod state;

pub use state::ApiState;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, put},
};
use tower_http::cors::CorsLayer;

use crate::config::CorsSettings;
use crate::infra::error::InfraError;
use crate::infra::http::middleware::log_responses;

pub fn build_api_router(state: ApiState, cors: &CorsSettings) -> Result<Router, InfraError> {
    let origin: HeaderValue = cors.allowed_origin.parse().map_err(|_| {
        InfraError::configuration(format!(
            "invalid CORS allowed origin `{}`",
            cors.allowed_origin
        ))
    })?;
    let cors_layer = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let rate_state = state.clone();

    Ok(Router::new()
        .route(
            "/api/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route(
            "/api/posts/{post_id}",
            put(handlers::update_post).delete(handlers::delete_post),
        )
        .route("/api/posts/search", get(handlers::search_posts))
        .with_state(state)
        .layer(cors_layer)
        .layer(axum_middleware::from_fn_with_state(
            rate_state,
            middleware::list_rate_limit,
        ))
        .layer(axum_middleware::from_fn(log_responses)))
}

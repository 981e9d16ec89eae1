pub mod api;
pub mod middleware;

pub use api::ApiState;
pub use api::rate_limit::ApiRateLimiter;

use axum::{Router, routing::get};

use crate::config::CorsSettings;
use crate::infra::error::InfraError;

/// Assemble the full application router: the welcome page plus the `/api`
/// surface with its CORS and rate-limit wiring.
pub fn build_router(state: ApiState, cors: &CorsSettings) -> Result<Router, InfraError> {
    let api = api::build_api_router(state, cors)?;
    Ok(Router::new().route("/", get(welcome)).merge(api))
}

async fn welcome() -> &'static str {
    "Welcome to the Masterblog API"
}

use std::sync::Arc;

use crate::application::posts::PostStore;

use super::rate_limit::ApiRateLimiter;

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<PostStore>,
    pub rate_limiter: Arc<ApiRateLimiter>,
}

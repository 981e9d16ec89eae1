use serde::{Deserialize, Serialize};

/// Listing parameters, kept as raw strings so the store can report
/// non-integer `page`/`limit` values with its own message instead of a
/// deserializer rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostListParams {
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PostCreateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PostUpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostSearchParams {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostDeletedResponse {
    pub message: String,
}

//! Posts handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::error::PostStoreError;
use crate::application::posts::{ListPostsQuery, NewPost, PostPatch, SearchQuery};

use super::error::ApiError;
use super::models::{
    PostCreateRequest, PostDeletedResponse, PostListParams, PostSearchParams, PostUpdateRequest,
};
use super::state::ApiState;

pub async fn list_posts(
    State(state): State<ApiState>,
    Query(params): Query<PostListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state.store.list(&ListPostsQuery {
        sort: params.sort,
        direction: params.direction,
        page: params.page,
        limit: params.limit,
    })?;

    Ok(Json(page))
}

pub async fn create_post(
    State(state): State<ApiState>,
    payload: Result<Json<PostCreateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = decode_create_payload(payload)?;

    let post = state.store.create(NewPost {
        title: request.title,
        content: request.content,
    })?;

    Ok((StatusCode::CREATED, Json(post)))
}

/// An absent body means "both fields are missing"; a body that fails to
/// decode is bad JSON.
fn decode_create_payload(
    payload: Result<Json<PostCreateRequest>, JsonRejection>,
) -> Result<PostCreateRequest, PostStoreError> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) => Err(PostStoreError::MissingField),
        Err(_) => Err(PostStoreError::InvalidPayload),
    }
}

pub async fn update_post(
    State(state): State<ApiState>,
    Path(post_id): Path<u64>,
    payload: Result<Json<PostUpdateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // Unknown ids report 404 before any payload diagnostics.
    if !state.store.contains(post_id) {
        return Err(PostStoreError::NotFound.into());
    }

    let Json(request) = payload.map_err(|_| PostStoreError::InvalidPayload)?;

    let post = state.store.update(
        post_id,
        PostPatch {
            title: request.title,
            content: request.content,
        },
    )?;

    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<ApiState>,
    Path(post_id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete(post_id)?;

    Ok(Json(PostDeletedResponse {
        message: format!("Post with id {post_id} has been deleted successfully."),
    }))
}

pub async fn search_posts(
    State(state): State<ApiState>,
    Query(params): Query<PostSearchParams>,
) -> impl IntoResponse {
    let posts = state.store.search(&SearchQuery {
        title: params.title,
        content: params.content,
    });

    Json(posts)
}

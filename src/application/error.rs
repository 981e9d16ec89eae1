use axum::http::StatusCode;
use axum::response::Response;
use thiserror::Error;

use crate::infra::error::InfraError;

/// Validation and lookup failures raised by post store operations. Each
/// variant carries the exact message surfaced to API clients.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PostStoreError {
    #[error("Sort field must be either 'title' or 'content'.")]
    InvalidSortField,
    #[error("Sort direction must be either 'asc' or 'desc'.")]
    InvalidSortDirection,
    #[error("Page and limit must be positive integers.")]
    InvalidPagination,
    #[error("Both 'title' and 'content' are required.")]
    MissingField,
    #[error("Invalid JSON data.")]
    InvalidPayload,
    #[error("Post not found.")]
    NotFound,
}

impl PostStoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Diagnostic payload carried on error responses so the shared logging
/// middleware can emit richer context than the public body exposes.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub message: String,
}

impl ErrorReport {
    pub fn from_message(
        source: &'static str,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            status,
            message: message.into(),
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

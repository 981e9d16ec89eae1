//! Shared offset pagination helpers.

use thiserror::Error;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 5;

/// Validated page window for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// Parse raw query values, falling back to the defaults when absent.
    /// Anything that is not a positive integer is rejected.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Result<Self, PaginationError> {
        Ok(Self {
            page: parse_positive(page, DEFAULT_PAGE)?,
            limit: parse_positive(limit, DEFAULT_LIMIT)?,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Slice bounds into a sequence of `len` items. A page past the end
    /// yields an empty window rather than an error.
    pub fn window(&self, len: usize) -> (usize, usize) {
        let start = (self.page - 1).saturating_mul(self.limit).min(len);
        let end = start.saturating_add(self.limit).min(len);
        (start, end)
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit)
    }
}

fn parse_positive(raw: Option<&str>, default: usize) -> Result<usize, PaginationError> {
    match raw {
        None => Ok(default),
        Some(value) => match value.trim().parse::<usize>() {
            Ok(parsed) if parsed > 0 => Ok(parsed),
            _ => Err(PaginationError::NotPositiveInteger),
        },
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page and limit must be positive integers")]
    NotPositiveInteger,
}

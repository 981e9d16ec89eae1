//! The in-memory post store and every operation the API exposes over it.

use std::sync::RwLock;

use serde::Serialize;
use tracing::debug;

use crate::application::error::PostStoreError;
use crate::application::pagination::{PageRequest, PaginationError};
use crate::domain::posts::Post;
use crate::domain::types::{SortDirection, SortField};

/// Raw listing parameters as they arrive on the query string. Validation
/// happens inside [`PostStore::list`] so the error precedence is in one place.
#[derive(Debug, Clone, Default)]
pub struct ListPostsQuery {
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Create payload after JSON decoding. Fields stay optional so the store can
/// report missing ones itself instead of leaning on a decoder error.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Partial update: absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Case-insensitive substring filters. Every supplied filter must match.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// One page of a listing, with the pre-pagination metadata clients need to
/// walk the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostPage {
    pub total_posts: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub posts: Vec<Post>,
}

impl From<PaginationError> for PostStoreError {
    fn from(_: PaginationError) -> Self {
        Self::InvalidPagination
    }
}

/// Process-wide post collection. All mutation funnels through these methods;
/// the lock serializes access when the server dispatches across threads.
#[derive(Debug, Default)]
pub struct PostStore {
    posts: RwLock<Vec<Post>>,
}

impl PostStore {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }

    /// The two posts every fresh process starts with.
    pub fn seeded() -> Self {
        Self::new(vec![
            Post::new(1, "First post", "This is the first post."),
            Post::new(2, "Second post", "This is the second post."),
        ])
    }

    /// List posts, optionally sorted, windowed by page and limit.
    ///
    /// Parameters are checked in a fixed order: sort field, then direction,
    /// then pagination, so a request with several bad parameters always
    /// reports the same one.
    pub fn list(&self, query: &ListPostsQuery) -> Result<PostPage, PostStoreError> {
        let sort = query
            .sort
            .as_deref()
            .map(|raw| SortField::parse(raw).ok_or(PostStoreError::InvalidSortField))
            .transpose()?;
        let direction = query
            .direction
            .as_deref()
            .map(|raw| SortDirection::parse(raw).ok_or(PostStoreError::InvalidSortDirection))
            .transpose()?
            .unwrap_or_default();
        let page = PageRequest::from_raw(query.page.as_deref(), query.limit.as_deref())?;

        let posts = self.posts.read().expect("post store lock poisoned");
        let mut ordered: Vec<Post> = posts.clone();
        drop(posts);

        if let Some(field) = sort {
            // Vec::sort_by is stable, so posts with equal keys keep their
            // collection order in both directions.
            ordered.sort_by(|a, b| {
                let left = a.field(field).to_lowercase();
                let right = b.field(field).to_lowercase();
                match direction {
                    SortDirection::Asc => left.cmp(&right),
                    SortDirection::Desc => right.cmp(&left),
                }
            });
        }

        let total_posts = ordered.len();
        let (start, end) = page.window(total_posts);

        Ok(PostPage {
            total_posts,
            page: page.page(),
            limit: page.limit(),
            total_pages: page.total_pages(total_posts),
            posts: ordered[start..end].to_vec(),
        })
    }

    /// Append a new post with the next monotonic id (`max existing id + 1`,
    /// `1` when the collection is empty).
    pub fn create(&self, new_post: NewPost) -> Result<Post, PostStoreError> {
        let title = non_empty(new_post.title).ok_or(PostStoreError::MissingField)?;
        let content = non_empty(new_post.content).ok_or(PostStoreError::MissingField)?;

        let mut posts = self.posts.write().expect("post store lock poisoned");
        let post_id = posts.iter().map(|post| post.post_id).max().unwrap_or(0) + 1;
        let post = Post {
            post_id,
            title,
            content,
        };
        posts.push(post.clone());
        debug!(target = "masterblog::posts", post_id, "created post");
        Ok(post)
    }

    pub fn contains(&self, post_id: u64) -> bool {
        self.posts
            .read()
            .expect("post store lock poisoned")
            .iter()
            .any(|post| post.post_id == post_id)
    }

    /// Overwrite the fields present in the patch, in place. The id never
    /// changes; an empty patch returns the post unmodified.
    pub fn update(&self, post_id: u64, patch: PostPatch) -> Result<Post, PostStoreError> {
        let mut posts = self.posts.write().expect("post store lock poisoned");
        let post = posts
            .iter_mut()
            .find(|post| post.post_id == post_id)
            .ok_or(PostStoreError::NotFound)?;

        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        debug!(target = "masterblog::posts", post_id, "updated post");
        Ok(post.clone())
    }

    pub fn delete(&self, post_id: u64) -> Result<(), PostStoreError> {
        let mut posts = self.posts.write().expect("post store lock poisoned");
        let index = posts
            .iter()
            .position(|post| post.post_id == post_id)
            .ok_or(PostStoreError::NotFound)?;
        posts.remove(index);
        debug!(target = "masterblog::posts", post_id, "deleted post");
        Ok(())
    }

    /// Posts whose fields contain every supplied needle, case-insensitively,
    /// in collection order. No filters means every post matches.
    pub fn search(&self, query: &SearchQuery) -> Vec<Post> {
        let title_needle = query.title.as_deref().map(str::to_lowercase);
        let content_needle = query.content.as_deref().map(str::to_lowercase);

        self.posts
            .read()
            .expect("post store lock poisoned")
            .iter()
            .filter(|post| {
                matches_needle(&post.title, title_needle.as_deref())
                    && matches_needle(&post.content, content_needle.as_deref())
            })
            .cloned()
            .collect()
    }
}

fn matches_needle(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(needle),
        None => true,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

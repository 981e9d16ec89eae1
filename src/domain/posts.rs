use serde::{Deserialize, Serialize};

use super::types::SortField;

/// A blog post. Ids are unique across the collection and assigned
/// monotonically; deletions may leave gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: u64,
    pub title: String,
    pub content: String,
}

impl Post {
    pub fn new(post_id: u64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            post_id,
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn field(&self, field: SortField) -> &str {
        match field {
            SortField::Title => &self.title,
            SortField::Content => &self.content,
        }
    }
}

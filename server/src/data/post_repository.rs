use async_trait::async_trait;

use super::ListParams;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostListItem};

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image: String,
    pub(crate) preview_image: String,
    pub(crate) user_id: i64,
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn find_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    /// Single-statement read for the detail endpoint: bumps `views` and
    /// returns the updated row, or nothing (and no write) when absent.
    async fn find_post_and_increment_views(&self, id: i64) -> Result<Option<Post>, DomainError>;
    /// Search matches `title` OR `content`, case-insensitive; rows are joined
    /// with the author profile and ordered by `created_at` descending.
    async fn list_posts(&self, params: ListParams) -> Result<Vec<PostListItem>, DomainError>;
    async fn count_posts(&self, search: Option<&str>) -> Result<i64, DomainError>;
    async fn insert_post(&self, input: NewPost) -> Result<Post, DomainError>;
    /// Writes every mutable column of the merged record plus
    /// `updated_at = NOW()`, returns the fresh row.
    async fn update_post(&self, post: &Post) -> Result<Post, DomainError>;
    /// Idempotent at this layer; existence is the caller's concern.
    async fn delete_post(&self, id: i64) -> Result<(), DomainError>;
}

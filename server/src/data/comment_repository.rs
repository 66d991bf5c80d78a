use async_trait::async_trait;

use super::ListParams;
use crate::domain::comment::{Comment, CommentListItem};
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewComment {
    pub(crate) post_id: i64,
    pub(crate) user_id: i64,
    pub(crate) content: String,
}

#[async_trait]
pub(crate) trait CommentRepository: Send + Sync {
    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, DomainError>;
    /// Comments expose no search fields; the filter is the parent post only.
    async fn list_comments(
        &self,
        post_id: i64,
        params: ListParams,
    ) -> Result<Vec<CommentListItem>, DomainError>;
    async fn count_comments(&self, post_id: i64) -> Result<i64, DomainError>;
    async fn insert_comment(&self, input: NewComment) -> Result<Comment, DomainError>;
    async fn update_comment(&self, comment: &Comment) -> Result<Comment, DomainError>;
    async fn delete_comment(&self, id: i64) -> Result<(), DomainError>;
}

use crate::data::ListParams;
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::PostRepository;
use crate::domain::comment::{Comment, CommentListItem, CommentPatch, CreateCommentRequest};
use crate::domain::error::DomainError;
use crate::domain::ownership::assert_owner;
use crate::domain::page::Page;

pub(crate) struct CommentService<C: CommentRepository, P: PostRepository> {
    comments: C,
    posts: P,
}

impl<C: CommentRepository, P: PostRepository> CommentService<C, P> {
    pub(crate) fn new(comments: C, posts: P) -> Self {
        Self { comments, posts }
    }

    pub(crate) async fn list_comments(
        &self,
        post_id: i64,
        limit: u32,
        page: u32,
    ) -> Result<Page<CommentListItem>, DomainError> {
        let params = ListParams {
            limit,
            page,
            search: None,
        };
        let comments = self.comments.list_comments(post_id, params).await?;
        let total = self.comments.count_comments(post_id).await?;

        Ok(Page::new(comments, limit, page, total))
    }

    pub(crate) async fn get_comment(&self, id: i64) -> Result<Comment, DomainError> {
        self.comments
            .find_comment(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment id: {id}")))
    }

    /// A comment must reference an existing post at creation time.
    pub(crate) async fn create_comment(
        &self,
        author_id: i64,
        post_id: i64,
        req: CreateCommentRequest,
    ) -> Result<Comment, DomainError> {
        let req = req.validate()?;

        self.posts
            .find_post(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))?;

        self.comments
            .insert_comment(NewComment {
                post_id,
                user_id: author_id,
                content: req.content,
            })
            .await
    }

    pub(crate) async fn update_comment(
        &self,
        actor_user_id: i64,
        comment_id: i64,
        patch: CommentPatch,
    ) -> Result<Comment, DomainError> {
        let patch = patch.validate()?;

        let stored = self
            .comments
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment id: {comment_id}")))?;
        assert_owner(stored.user_id, actor_user_id)?;

        self.comments.update_comment(&stored.merged(patch)).await
    }

    pub(crate) async fn delete_comment(
        &self,
        actor_user_id: i64,
        comment_id: i64,
    ) -> Result<(), DomainError> {
        let stored = self
            .comments
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("comment id: {comment_id}")))?;
        assert_owner(stored.user_id, actor_user_id)?;

        self.comments.delete_comment(comment_id).await
    }
}

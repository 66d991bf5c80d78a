use crate::data::ListParams;
use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::ownership::assert_owner;
use crate::domain::page::Page;
use crate::domain::post::{CreatePostRequest, Post, PostListItem, PostPatch};

pub(crate) struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn list_posts(
        &self,
        limit: u32,
        page: u32,
        search: Option<String>,
    ) -> Result<Page<PostListItem>, DomainError> {
        let params = ListParams {
            limit,
            page,
            search,
        };
        let posts = self.repo.list_posts(params.clone()).await?;
        let total = self.repo.count_posts(params.search.as_deref()).await?;

        Ok(Page::new(posts, limit, page, total))
    }

    /// Detail read counts as a view; the bump and the read are one statement.
    pub(crate) async fn get_post(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .find_post_and_increment_views(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn create_post(
        &self,
        author_id: i64,
        req: CreatePostRequest,
    ) -> Result<Post, DomainError> {
        let req = req.validate()?;

        self.repo
            .insert_post(NewPost {
                title: req.title,
                content: req.content,
                image: req.image,
                preview_image: req.preview_image,
                user_id: author_id,
            })
            .await
    }

    pub(crate) async fn update_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
        patch: PostPatch,
    ) -> Result<Post, DomainError> {
        let patch = patch.validate()?;

        let stored = self
            .repo
            .find_post(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))?;
        assert_owner(stored.user_id, actor_user_id)?;

        self.repo.update_post(&stored.merged(patch)).await
    }

    pub(crate) async fn delete_post(
        &self,
        actor_user_id: i64,
        post_id: i64,
    ) -> Result<(), DomainError> {
        let stored = self
            .repo
            .find_post(post_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("post id: {post_id}")))?;
        assert_owner(stored.user_id, actor_user_id)?;

        self.repo.delete_post(post_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::PostService;
    use crate::data::ListParams;
    use crate::data::post_repository::{NewPost, PostRepository};
    use crate::domain::error::DomainError;
    use crate::domain::post::{CreatePostRequest, Post, PostListItem, PostPatch};

    #[derive(Clone, Default)]
    struct FakePostRepo {
        created_input: Arc<Mutex<Option<NewPost>>>,
        post_for_find: Arc<Mutex<Option<Post>>>,
        post_for_view: Arc<Mutex<Option<Post>>>,
        updated_record: Arc<Mutex<Option<Post>>>,
        deleted_id: Arc<Mutex<Option<i64>>>,
        list_result: Arc<Mutex<Vec<PostListItem>>>,
        total_result: Arc<Mutex<i64>>,
    }

    #[async_trait]
    impl PostRepository for FakePostRepo {
        async fn find_post(&self, _id: i64) -> Result<Option<Post>, DomainError> {
            Ok(self
                .post_for_find
                .lock()
                .expect("post_for_find mutex poisoned")
                .clone())
        }

        async fn find_post_and_increment_views(
            &self,
            _id: i64,
        ) -> Result<Option<Post>, DomainError> {
            Ok(self
                .post_for_view
                .lock()
                .expect("post_for_view mutex poisoned")
                .clone())
        }

        async fn list_posts(&self, _params: ListParams) -> Result<Vec<PostListItem>, DomainError> {
            Ok(self
                .list_result
                .lock()
                .expect("list_result mutex poisoned")
                .clone())
        }

        async fn count_posts(&self, _search: Option<&str>) -> Result<i64, DomainError> {
            Ok(*self
                .total_result
                .lock()
                .expect("total_result mutex poisoned"))
        }

        async fn insert_post(&self, input: NewPost) -> Result<Post, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input.clone());
            Ok(sample_post(1, &input.title, input.user_id))
        }

        async fn update_post(&self, post: &Post) -> Result<Post, DomainError> {
            *self
                .updated_record
                .lock()
                .expect("updated_record mutex poisoned") = Some(post.clone());
            let mut updated = post.clone();
            updated.updated_at = Some(Utc::now());
            Ok(updated)
        }

        async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
            *self.deleted_id.lock().expect("deleted_id mutex poisoned") = Some(id);
            Ok(())
        }
    }

    fn sample_post(id: i64, title: &str, user_id: i64) -> Post {
        Post {
            id,
            title: title.to_string(),
            content: "content".to_string(),
            image: "i".to_string(),
            preview_image: "p".to_string(),
            views: 0,
            user_id,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn create_post_normalizes_request_before_repo_call() {
        let repo = FakePostRepo::default();
        let service = PostService::new(repo.clone());

        let created = service
            .create_post(
                10,
                CreatePostRequest {
                    title: "  title  ".to_string(),
                    content: "  content  ".to_string(),
                    image: "i".to_string(),
                    preview_image: "p".to_string(),
                },
            )
            .await
            .expect("create must succeed");

        assert_eq!(created.title, "title");
        assert_eq!(created.user_id, 10);

        let input = repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert_eq!(input.title, "title");
        assert_eq!(input.content, "content");
        assert_eq!(input.user_id, 10);
    }

    #[tokio::test]
    async fn get_post_returns_not_found_when_missing() {
        let service = PostService::new(FakePostRepo::default());

        let err = service.get_post(42).await.expect_err("must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_post_merges_patch_and_keeps_absent_fields() {
        let repo = FakePostRepo::default();
        *repo
            .post_for_find
            .lock()
            .expect("post_for_find mutex poisoned") = Some(sample_post(7, "old title", 10));

        let service = PostService::new(repo.clone());
        let updated = service
            .update_post(
                10,
                7,
                PostPatch {
                    title: Some("new title".to_string()),
                    ..PostPatch::default()
                },
            )
            .await
            .expect("update must succeed");

        assert_eq!(updated.title, "new title");
        assert!(updated.updated_at.is_some());

        let written = repo
            .updated_record
            .lock()
            .expect("updated_record mutex poisoned")
            .clone()
            .expect("merged record must reach the repo");
        assert_eq!(written.title, "new title");
        assert_eq!(written.content, "content");
        assert_eq!(written.image, "i");
    }

    #[tokio::test]
    async fn update_post_by_non_owner_is_forbidden() {
        let repo = FakePostRepo::default();
        *repo
            .post_for_find
            .lock()
            .expect("post_for_find mutex poisoned") = Some(sample_post(7, "title", 99));

        let service = PostService::new(repo);
        let err = service
            .update_post(10, 7, PostPatch::default())
            .await
            .expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));
    }

    #[tokio::test]
    async fn delete_post_by_non_owner_is_forbidden() {
        let repo = FakePostRepo::default();
        *repo
            .post_for_find
            .lock()
            .expect("post_for_find mutex poisoned") = Some(sample_post(7, "title", 99));

        let service = PostService::new(repo.clone());
        let err = service
            .delete_post(10, 7)
            .await
            .expect_err("must be forbidden");
        assert!(matches!(err, DomainError::Forbidden));
        assert!(
            repo.deleted_id
                .lock()
                .expect("deleted_id mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn delete_post_by_owner_reaches_repo() {
        let repo = FakePostRepo::default();
        *repo
            .post_for_find
            .lock()
            .expect("post_for_find mutex poisoned") = Some(sample_post(7, "title", 10));

        let service = PostService::new(repo.clone());
        service.delete_post(10, 7).await.expect("must succeed");
        assert_eq!(
            *repo.deleted_id.lock().expect("deleted_id mutex poisoned"),
            Some(7)
        );
    }

    #[tokio::test]
    async fn list_posts_wraps_rows_in_page_envelope() {
        let repo = FakePostRepo::default();
        *repo
            .total_result
            .lock()
            .expect("total_result mutex poisoned") = 31;

        let service = PostService::new(repo);
        let page = service
            .list_posts(10, 2, Some("foo".to_string()))
            .await
            .expect("list must succeed");

        assert_eq!(page.limit, 10);
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 31);
        assert_eq!(page.total_pages, 4);
        assert!(page.has_next);
        assert!(page.has_prev);
    }
}

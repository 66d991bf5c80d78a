use crate::data::ListParams;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::page::Page;
use crate::domain::user::{User, UserPatch};

pub(crate) struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn list_users(
        &self,
        limit: u32,
        page: u32,
        search: Option<String>,
    ) -> Result<Page<User>, DomainError> {
        let params = ListParams {
            limit,
            page,
            search,
        };
        let users = self.repo.list_users(params.clone()).await?;
        let total = self.repo.count_users(params.search.as_deref()).await?;

        Ok(Page::new(users, limit, page, total))
    }

    pub(crate) async fn profile(&self, user_id: i64) -> Result<User, DomainError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {user_id}")))
    }

    /// Merge-then-overwrite: the stored snapshot plus the patch becomes the
    /// full record the repository writes back.
    pub(crate) async fn update_profile(
        &self,
        user_id: i64,
        patch: UserPatch,
    ) -> Result<User, DomainError> {
        let patch = patch.validate()?;

        let stored = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("user id: {user_id}")))?;

        self.repo.update_profile(&stored.merged(patch)).await
    }
}

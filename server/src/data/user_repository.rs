use async_trait::async_trait;

use super::ListParams;
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) email: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<(), DomainError>;
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    /// Search matches `first_name` OR `last_name`, case-insensitive.
    async fn list_users(&self, params: ListParams) -> Result<Vec<User>, DomainError>;
    async fn count_users(&self, search: Option<&str>) -> Result<i64, DomainError>;
    /// Writes every profile column of the merged record, returns the fresh row.
    async fn update_profile(&self, user: &User) -> Result<User, DomainError>;
}

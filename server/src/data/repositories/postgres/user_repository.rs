use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::like_pattern;
use crate::data::ListParams;
use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i64,
    email: String,
    first_name: String,
    last_name: String,
    avatar: Option<String>,
    bio: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct UserCredentialsRow {
    id: i64,
    email: String,
    first_name: String,
    last_name: String,
    avatar: Option<String>,
    bio: Option<String>,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            avatar: row.avatar,
            bio: row.bio,
            created_at: row.created_at,
        }
    }
}

impl From<UserCredentialsRow> for UserCredentials {
    fn from(row: UserCredentialsRow) -> Self {
        UserCredentials {
            user: User {
                id: row.id,
                email: row.email,
                first_name: row.first_name,
                last_name: row.last_name,
                avatar: row.avatar,
                bio: row.bio,
                created_at: row.created_at,
            },
            password_hash: row.password_hash,
        }
    }
}

const USER_COLUMNS: &str = "id, email, first_name, last_name, avatar, bio, created_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (email, first_name, last_name, password_hash)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&input.email)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT TRUE FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(map_user_db_error)?;

        Ok(exists)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT id, email, first_name, last_name, avatar, bio, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(row.map(UserCredentials::from))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(row.map(User::from))
    }

    async fn list_users(&self, params: ListParams) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE ($1::text IS NULL
                   OR first_name ILIKE $1
                   OR last_name ILIKE $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            OFFSET $3
            "#
        ))
        .bind(like_pattern(params.search.as_deref()))
        .bind(params.limit as i64)
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn count_users(&self, search: Option<&str>) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM users
            WHERE ($1::text IS NULL
                   OR first_name ILIKE $1
                   OR last_name ILIKE $1)
            "#,
        )
        .bind(like_pattern(search))
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        Ok(count)
    }

    async fn update_profile(&self, user: &User) -> Result<User, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_user_db_error)?;

        sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2,
                last_name = $3,
                avatar = $4,
                bio = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.avatar)
        .bind(&user.bio)
        .execute(&mut *tx)
        .await
        .map_err(map_user_db_error)?;

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_user_db_error)?
        .ok_or_else(|| DomainError::NotFound(format!("user id: {}", user.id)))?;

        tx.commit().await.map_err(map_user_db_error)?;
        Ok(User::from(row))
    }
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        return DomainError::AlreadyExists("email".to_string());
    }
    DomainError::Unexpected(err.to_string())
}

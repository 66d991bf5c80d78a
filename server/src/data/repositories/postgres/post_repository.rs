use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::like_pattern;
use crate::data::ListParams;
use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostListItem};
use crate::domain::user::OwnerProfile;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    image: String,
    preview_image: String,
    views: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(FromRow)]
struct PostListRow {
    id: i64,
    title: String,
    content: String,
    image: String,
    preview_image: String,
    views: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    first_name: String,
    last_name: String,
    avatar: Option<String>,
    email: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            title: row.title,
            content: row.content,
            image: row.image,
            preview_image: row.preview_image,
            views: row.views,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<PostListRow> for PostListItem {
    fn from(row: PostListRow) -> Self {
        PostListItem {
            post: Post {
                id: row.id,
                title: row.title,
                content: row.content,
                image: row.image,
                preview_image: row.preview_image,
                views: row.views,
                user_id: row.user_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            author: OwnerProfile {
                first_name: row.first_name,
                last_name: row.last_name,
                avatar: row.avatar,
                email: row.email,
            },
        }
    }
}

const POST_COLUMNS: &str =
    "id, title, content, image, preview_image, views, user_id, created_at, updated_at";

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.map(Post::from))
    }

    async fn find_post_and_increment_views(&self, id: i64) -> Result<Option<Post>, DomainError> {
        // One atomic statement: a miss writes nothing.
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            UPDATE posts
            SET views = views + 1
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.map(Post::from))
    }

    async fn list_posts(&self, params: ListParams) -> Result<Vec<PostListItem>, DomainError> {
        let rows = sqlx::query_as::<_, PostListRow>(
            r#"
            SELECT
                posts.id,
                posts.title,
                posts.content,
                posts.image,
                posts.preview_image,
                posts.views,
                posts.user_id,
                posts.created_at,
                posts.updated_at,
                users.first_name,
                users.last_name,
                users.avatar,
                users.email
            FROM posts
            INNER JOIN users ON posts.user_id = users.id
            WHERE ($1::text IS NULL
                   OR posts.title ILIKE $1
                   OR posts.content ILIKE $1)
            ORDER BY posts.created_at DESC, posts.id DESC
            LIMIT $2
            OFFSET $3
            "#,
        )
        .bind(like_pattern(params.search.as_deref()))
        .bind(params.limit as i64)
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(PostListItem::from).collect())
    }

    async fn count_posts(&self, search: Option<&str>) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM posts
            WHERE ($1::text IS NULL
                   OR title ILIKE $1
                   OR content ILIKE $1)
            "#,
        )
        .bind(like_pattern(search))
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(count)
    }

    async fn insert_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_post_db_error)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, content, image, preview_image, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(&input.image)
        .bind(&input.preview_image)
        .bind(input.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        tx.commit().await.map_err(map_post_db_error)?;
        Ok(Post::from(row))
    }

    async fn update_post(&self, post: &Post) -> Result<Post, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_post_db_error)?;

        sqlx::query(
            r#"
            UPDATE posts
            SET title = $2,
                content = $3,
                image = $4,
                preview_image = $5,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image)
        .bind(&post.preview_image)
        .execute(&mut *tx)
        .await
        .map_err(map_post_db_error)?;

        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(post.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_post_db_error)?
        .ok_or_else(|| DomainError::NotFound(format!("post id: {}", post.id)))?;

        tx.commit().await.map_err(map_post_db_error)?;
        Ok(Post::from(row))
    }

    async fn delete_post(&self, id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(())
    }
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("author".to_string());
    }
    DomainError::Unexpected(err.to_string())
}

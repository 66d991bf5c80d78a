use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::ListParams;
use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::{Comment, CommentListItem};
use crate::domain::error::DomainError;
use crate::domain::user::OwnerProfile;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    content: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(FromRow)]
struct CommentListRow {
    id: i64,
    post_id: i64,
    content: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    first_name: String,
    last_name: String,
    avatar: Option<String>,
    email: String,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            post_id: row.post_id,
            content: row.content,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<CommentListRow> for CommentListItem {
    fn from(row: CommentListRow) -> Self {
        CommentListItem {
            comment: Comment {
                id: row.id,
                post_id: row.post_id,
                content: row.content,
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

const COMMENT_COLUMNS: &str = "id, post_id, content, user_id, created_at, updated_at";

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_comment(&self, id: i64) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(row.map(Comment::from))
    }

    async fn list_comments(
        &self,
        post_id: i64,
        params: ListParams,
    ) -> Result<Vec<CommentListItem>, DomainError> {
        let rows = sqlx::query_as::<_, CommentListRow>(
            r#"
            SELECT
                comments.id,
                comments.post_id,
                comments.content,
                comments.user_id,
                comments.created_at,
                comments.updated_at,
                users.first_name,
                users.last_name,
                users.avatar,
                users.email
            FROM comments
            INNER JOIN users ON comments.user_id = users.id
            WHERE comments.post_id = $1
            ORDER BY comments.created_at DESC, comments.id DESC
            LIMIT $2
            OFFSET $3
            "#,
        )
        .bind(post_id)
        .bind(params.limit as i64)
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(rows.into_iter().map(CommentListItem::from).collect())
    }

    async fn count_comments(&self, post_id: i64) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_comment_db_error)?;

        Ok(count)
    }

    async fn insert_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_comment_db_error)?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO comments (post_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(input.post_id)
        .bind(input.user_id)
        .bind(&input.content)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_comment_db_error)?;

        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_comment_db_error)?;

        tx.commit().await.map_err(map_comment_db_error)?;
        Ok(Comment::from(row))
    }

    async fn update_comment(&self, comment: &Comment) -> Result<Comment, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_comment_db_error)?;

        sqlx::query(
            r#"
            UPDATE comments
            SET content = $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(comment.id)
        .bind(&comment.content)
        .execute(&mut *tx)
        .await
        .map_err(map_comment_db_error)?;

        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(comment.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_comment_db_error)?
        .ok_or_else(|| DomainError::NotFound(format!("comment id: {}", comment.id)))?;

        tx.commit().await.map_err(map_comment_db_error)?;
        Ok(Comment::from(row))
    }

    async fn delete_comment(&self, id: i64) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_comment_db_error)?;

        Ok(())
    }
}

fn map_comment_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        let resource = match db_err.constraint() {
            Some("comments_post_id_fkey") => "post",
            Some("comments_user_id_fkey") => "author",
            _ => "comment parent",
        };
        return DomainError::NotFound(resource.to_string());
    }
    DomainError::Unexpected(err.to_string())
}

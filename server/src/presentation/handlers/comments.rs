use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::PaginationQuery;
use crate::domain::comment::{Comment, CommentListItem, CommentPatch, CreateCommentRequest};
use crate::domain::page::Page;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateCommentDto {
    #[validate(length(min = 1))]
    pub(crate) content: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateCommentDto {
    #[validate(length(min = 1))]
    pub(crate) content: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentDto {
    pub(crate) id: i64,
    pub(crate) post_id: i64,
    pub(crate) content: String,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentListItemDto {
    #[serde(flatten)]
    pub(crate) comment: CommentDto,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) avatar: Option<String>,
    pub(crate) email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentsListDto {
    pub(crate) data: Vec<CommentListItemDto>,
    pub(crate) limit: u32,
    pub(crate) page: u32,
    pub(crate) total: i64,
    pub(crate) total_pages: u32,
    pub(crate) has_next: bool,
    pub(crate) has_prev: bool,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content,
            user_id: comment.user_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<CommentListItem> for CommentListItemDto {
    fn from(item: CommentListItem) -> Self {
        Self {
            comment: CommentDto::from(item.comment),
            first_name: item.author.first_name,
            last_name: item.author.last_name,
            avatar: item.author.avatar,
            email: item.author.email,
        }
    }
}

impl From<Page<CommentListItem>> for CommentsListDto {
    fn from(page: Page<CommentListItem>) -> Self {
        let page = page.map(CommentListItemDto::from);
        Self {
            data: page.data,
            limit: page.limit,
            page: page.page,
            total: page.total,
            total_pages: page.total_pages,
            has_next: page.has_next,
            has_prev: page.has_prev,
        }
    }
}

#[utoipa::path(
    get,
    path = "/posts/{id}/comments",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Post id"),
        ("limit" = Option<u32>, Query, description = "Items per page (1..=100)"),
        ("page" = Option<u32>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "Comments listed", body = CommentsListDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_post_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<(StatusCode, Json<CommentsListDto>)> {
    query.validate()?;

    let page = state
        .comment_service
        .list_comments(post_id, query.limit(), query.page())
        .await?;

    Ok((StatusCode::OK, Json(CommentsListDto::from(page))))
}

#[utoipa::path(
    post,
    path = "/posts/{id}/comments",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(post_id): Path<i64>,
    Json(dto): Json<CreateCommentDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    dto.validate()?;

    let comment = state
        .comment_service
        .create_comment(
            auth.user_id,
            post_id,
            CreateCommentRequest {
                content: dto.content,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CommentDto::from(comment))))
}

#[utoipa::path(
    get,
    path = "/comments/{id}",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 200, description = "Comment found", body = CommentDto),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    let comment = state.comment_service.get_comment(id).await?;

    Ok((StatusCode::OK, Json(CommentDto::from(comment))))
}

#[utoipa::path(
    put,
    path = "/comments/{id}",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Comment id")
    ),
    request_body = UpdateCommentDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateCommentDto>,
) -> AppResult<(StatusCode, Json<CommentDto>)> {
    dto.validate()?;

    let comment = state
        .comment_service
        .update_comment(
            auth.user_id,
            id,
            CommentPatch {
                content: dto.content,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(CommentDto::from(comment))))
}

#[utoipa::path(
    delete,
    path = "/comments/{id}",
    tag = "comments",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.comment_service.delete_comment(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

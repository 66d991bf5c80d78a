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
use crate::domain::page::Page;
use crate::domain::post::{CreatePostRequest, Post, PostListItem, PostPatch};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: String,
    #[validate(length(min = 1))]
    pub(crate) content: String,
    #[validate(length(min = 1))]
    pub(crate) image: String,
    #[validate(length(min = 1))]
    pub(crate) preview_image: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdatePostDto {
    #[validate(length(min = 1, max = 255))]
    pub(crate) title: Option<String>,
    #[validate(length(min = 1))]
    pub(crate) content: Option<String>,
    #[validate(length(min = 1))]
    pub(crate) image: Option<String>,
    #[validate(length(min = 1))]
    pub(crate) preview_image: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) image: String,
    pub(crate) preview_image: String,
    pub(crate) views: i64,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: Option<DateTime<Utc>>,
}

/// List row: post fields plus the author's profile, flattened.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostListItemDto {
    #[serde(flatten)]
    pub(crate) post: PostDto,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) avatar: Option<String>,
    pub(crate) email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostsListDto {
    pub(crate) data: Vec<PostListItemDto>,
    pub(crate) limit: u32,
    pub(crate) page: u32,
    pub(crate) total: i64,
    pub(crate) total_pages: u32,
    pub(crate) has_next: bool,
    pub(crate) has_prev: bool,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            image: post.image,
            preview_image: post.preview_image,
            views: post.views,
            user_id: post.user_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<PostListItem> for PostListItemDto {
    fn from(item: PostListItem) -> Self {
        Self {
            post: PostDto::from(item.post),
            first_name: item.author.first_name,
            last_name: item.author.last_name,
            avatar: item.author.avatar,
            email: item.author.email,
        }
    }
}

impl From<Page<PostListItem>> for PostsListDto {
    fn from(page: Page<PostListItem>) -> Self {
        let page = page.map(PostListItemDto::from);
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
    path = "/posts",
    tag = "posts",
    params(
        ("limit" = Option<u32>, Query, description = "Items per page (1..=100)"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("search" = Option<String>, Query, description = "Substring match on title or content")
    ),
    responses(
        (status = 200, description = "Posts listed", body = PostsListDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<(StatusCode, Json<PostsListDto>)> {
    query.validate()?;

    let page = state
        .post_service
        .list_posts(query.limit(), query.page(), query.search.clone())
        .await?;

    Ok((StatusCode::OK, Json(PostsListDto::from(page))))
}

#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found; its view counter is incremented", body = PostDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    let post = state.post_service.get_post(id).await?;

    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<CreatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;

    let post = state
        .post_service
        .create_post(
            auth.user_id,
            CreatePostRequest {
                title: dto.title,
                content: dto.content,
                image: dto.image,
                preview_image: dto.preview_image,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PostDto::from(post))))
}

#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(dto): Json<UpdatePostDto>,
) -> AppResult<(StatusCode, Json<PostDto>)> {
    dto.validate()?;

    let post = state
        .post_service
        .update_post(
            auth.user_id,
            id,
            PostPatch {
                title: dto.title,
                content: dto.content,
                image: dto.image,
                preview_image: dto.preview_image,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(PostDto::from(post))))
}

#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.post_service.delete_post(auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

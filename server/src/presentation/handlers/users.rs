use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::PaginationQuery;
use crate::domain::page::Page;
use crate::domain::user::{CreateUserRequest, LoginRequest, User, UserPatch};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateUserDto {
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 1, max = 64))]
    pub(crate) first_name: String,
    #[validate(length(min = 1, max = 64))]
    pub(crate) last_name: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TokenDto {
    pub(crate) access_token: String,
    pub(crate) token_type: &'static str,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateProfileDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) first_name: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub(crate) last_name: Option<String>,
    #[validate(url)]
    pub(crate) avatar: Option<String>,
    pub(crate) bio: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) email: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) avatar: Option<String>,
    pub(crate) bio: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UsersListDto {
    pub(crate) data: Vec<UserDto>,
    pub(crate) limit: u32,
    pub(crate) page: u32,
    pub(crate) total: i64,
    pub(crate) total_pages: u32,
    pub(crate) has_next: bool,
    pub(crate) has_prev: bool,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            avatar: user.avatar,
            bio: user.bio,
            created_at: user.created_at,
        }
    }
}

impl From<Page<User>> for UsersListDto {
    fn from(page: Page<User>) -> Self {
        let page = page.map(UserDto::from);
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
    post,
    path = "/users/create",
    tag = "users",
    request_body = CreateUserDto,
    responses(
        (status = 204, description = "User created"),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_user(
    State(state): State<AppState>,
    Json(dto): Json<CreateUserDto>,
) -> AppResult<StatusCode> {
    dto.validate()?;

    state
        .auth_service
        .create_user(CreateUserRequest {
            email: dto.email,
            first_name: dto.first_name,
            last_name: dto.last_name,
            password: dto.password,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/users/login",
    tag = "users",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = TokenDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> AppResult<(StatusCode, Json<TokenDto>)> {
    dto.validate()?;

    let access_token = state
        .auth_service
        .login(LoginRequest {
            email: dto.email,
            password: dto.password,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(TokenDto {
            access_token,
            token_type: "Bearer",
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(
        ("limit" = Option<u32>, Query, description = "Items per page (1..=100)"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("search" = Option<String>, Query, description = "Substring match on first or last name")
    ),
    responses(
        (status = 200, description = "Users listed", body = UsersListDto),
        (status = 400, description = "Validation error"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<(StatusCode, Json<UsersListDto>)> {
    query.validate()?;

    let page = state
        .user_service
        .list_users(query.limit(), query.page(), query.search.clone())
        .await?;

    Ok((StatusCode::OK, Json(UsersListDto::from(page))))
}

#[utoipa::path(
    get,
    path = "/users/profile",
    tag = "users",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Authenticated user's profile", body = UserDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let user = state.user_service.profile(auth.user_id).await?;

    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

#[utoipa::path(
    put,
    path = "/users/profile",
    tag = "users",
    security(
        ("bearer_auth" = [])
    ),
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<UpdateProfileDto>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    dto.validate()?;

    let user = state
        .user_service
        .update_profile(
            auth.user_id,
            UserPatch {
                first_name: dto.first_name,
                last_name: dto.last_name,
                avatar: dto.avatar,
                bio: dto.bio,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

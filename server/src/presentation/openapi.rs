use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::PaginationQuery;
use crate::presentation::handlers::comments::{
    CommentDto, CommentListItemDto, CommentsListDto, CreateCommentDto, UpdateCommentDto,
};
use crate::presentation::handlers::posts::{
    CreatePostDto, PostDto, PostListItemDto, PostsListDto, UpdatePostDto,
};
use crate::presentation::handlers::users::{
    CreateUserDto, LoginDto, TokenDto, UpdateProfileDto, UserDto, UsersListDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::users::create_user,
        crate::presentation::handlers::users::login,
        crate::presentation::handlers::users::list_users,
        crate::presentation::handlers::users::profile,
        crate::presentation::handlers::users::update_profile,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::comments::list_post_comments,
        crate::presentation::handlers::comments::create_comment,
        crate::presentation::handlers::comments::get_comment,
        crate::presentation::handlers::comments::update_comment,
        crate::presentation::handlers::comments::delete_comment
    ),
    components(
        schemas(
            CreateUserDto,
            LoginDto,
            TokenDto,
            UpdateProfileDto,
            UserDto,
            UsersListDto,
            CreatePostDto,
            UpdatePostDto,
            PostDto,
            PostListItemDto,
            PostsListDto,
            CreateCommentDto,
            UpdateCommentDto,
            CommentDto,
            CommentListItemDto,
            CommentsListDto,
            PaginationQuery
        )
    ),
    tags(
        (name = "users", description = "User registration, login and profiles"),
        (name = "posts", description = "Post endpoints"),
        (name = "comments", description = "Comment endpoints")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}

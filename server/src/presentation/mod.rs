use std::sync::Arc;

use sqlx::PgPool;

use crate::application::auth_service::AuthService;
use crate::application::comment_service::CommentService;
use crate::application::post_service::PostService;
use crate::application::user_service::UserService;
use crate::data::repositories::postgres::comment_repository::PostgresCommentRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::settings::Settings;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) user_service: Arc<UserService<PostgresUserRepository>>,
    pub(crate) post_service: Arc<PostService<PostgresPostRepository>>,
    pub(crate) comment_service:
        Arc<CommentService<PostgresCommentRepository, PostgresPostRepository>>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn build(pool: PgPool, settings: &Settings) -> Self {
        let jwt = Arc::new(JwtService::new(
            &settings.jwt_secret,
            settings.jwt_ttl_minutes,
        ));

        let user_repo = PostgresUserRepository::new(pool.clone());
        let post_repo = PostgresPostRepository::new(pool.clone());
        let comment_repo = PostgresCommentRepository::new(pool);

        Self {
            auth_service: Arc::new(AuthService::new(user_repo.clone(), jwt.clone())),
            user_service: Arc::new(UserService::new(user_repo)),
            post_service: Arc::new(PostService::new(post_repo.clone())),
            comment_service: Arc::new(CommentService::new(comment_repo, post_repo)),
            jwt,
        }
    }
}

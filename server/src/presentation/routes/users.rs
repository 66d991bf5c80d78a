use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::users::{
    create_user, list_users, login, profile, update_profile,
};
use crate::presentation::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_users))
        .route("/create", post(create_user))
        .route("/login", post(login));

    let protected = Router::new()
        .route("/profile", get(profile).put(update_profile))
        .layer(middleware::from_fn_with_state(
            state,
            jwt_auth_middleware,
        ));

    public.merge(protected)
}

use axum::Router;
use axum::middleware;
use axum::routing::{get, put};

use crate::presentation::AppState;
use crate::presentation::handlers::comments::{delete_comment, get_comment, update_comment};
use crate::presentation::middleware::auth::jwt_auth_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new().route("/{id}", get(get_comment));

    let protected = Router::new()
        .route("/{id}", put(update_comment).delete(delete_comment))
        .layer(middleware::from_fn_with_state(
            state,
            jwt_auth_middleware,
        ));

    public.merge(protected)
}

use axum::{Json, Router, routing::get};
use serde::Serialize;

use super::AppState;

pub(crate) mod comments;
pub(crate) mod posts;
pub(crate) mod users;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health_handler))
        .nest("/users", users::router(state.clone()))
        .nest("/posts", posts::router(state.clone()))
        .nest("/comments", comments::router(state))
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}

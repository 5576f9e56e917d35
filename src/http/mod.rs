use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::AppState;

mod auth;
mod error;
mod handlers;
mod routes;

pub use auth::AdminToken;
pub use error::AppError;

pub fn router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.upload_max_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(1);

    Router::new()
        .merge(routes::health())
        .merge(routes::profiles())
        .merge(routes::posts())
        .merge(routes::admin())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

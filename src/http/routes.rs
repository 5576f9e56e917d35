use axum::{routing::delete, routing::get, routing::patch, routing::post, Router};

use crate::http::handlers;
use crate::AppState;

pub fn health() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health))
}

pub fn profiles() -> Router<AppState> {
    Router::new()
        .route("/v1/profiles", post(handlers::create_profile))
        .route("/v1/profiles", get(handlers::list_profiles))
        .route("/v1/profiles/:id", get(handlers::get_profile))
        .route("/v1/profiles/:id", patch(handlers::update_profile))
        .route("/v1/profiles/:id", delete(handlers::delete_profile))
        .route(
            "/v1/profiles/:id/picture",
            post(handlers::upload_profile_picture),
        )
        .route("/v1/profiles/:id/follow", post(handlers::follow_profile))
        .route("/v1/profiles/:id/unfollow", post(handlers::unfollow_profile))
        .route("/v1/profiles/:id/followers", get(handlers::list_followers))
        .route("/v1/profiles/:id/following", get(handlers::list_following))
        .route("/v1/profiles/:id/posts", get(handlers::list_profile_posts))
}

pub fn posts() -> Router<AppState> {
    Router::new()
        .route("/v1/posts", post(handlers::create_post))
        .route("/v1/posts/:id", get(handlers::get_post))
        .route("/v1/posts/:id", patch(handlers::update_post_content))
        .route("/v1/posts/:id", delete(handlers::delete_post))
        .route("/v1/posts/:id/picture", post(handlers::upload_post_picture))
        .route("/v1/posts/:id/likes", post(handlers::like_post))
        .route("/v1/posts/:id/likes", delete(handlers::unlike_post))
        .route("/v1/posts/:id/likes", get(handlers::list_post_likes))
        .route("/v1/posts/:id/comments", post(handlers::create_comment))
        .route("/v1/posts/:id/comments", get(handlers::list_post_comments))
        .route(
            "/v1/posts/:id/comments/:comment_id",
            delete(handlers::delete_comment),
        )
}

pub fn admin() -> Router<AppState> {
    Router::new()
        .route("/admin/:entity", get(handlers::admin_list))
        .route("/admin/:entity/:id", get(handlers::admin_get))
        .route("/admin/:entity/:id", patch(handlers::admin_update))
        .route("/admin/:entity/:id", delete(handlers::admin_delete))
}

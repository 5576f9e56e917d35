use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::app::admin::{AdminEntity, AdminService};
use crate::app::engagement::EngagementService;
use crate::app::pictures::PictureService;
use crate::app::posts::PostService;
use crate::app::profiles::{NewProfile, ProfileChanges, ProfileService};
use crate::app::social::{RelationshipEdge, SocialService};
use crate::domain::engagement::{Comment, Like};
use crate::domain::post::Post;
use crate::domain::profile::ProfileView;
use crate::domain::relationship::Relationship;
use crate::http::{AdminToken, AppError};
use crate::AppState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}

#[derive(Deserialize)]
pub struct OffsetQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

fn page_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(20).clamp(1, 100)
}

fn parse_cursor(cursor: Option<String>) -> Result<Option<(OffsetDateTime, Uuid)>, AppError> {
    let Some(cursor) = cursor else {
        return Ok(None);
    };

    let mut parts = cursor.splitn(2, '/');
    let timestamp = parts
        .next()
        .ok_or_else(|| AppError::bad_request("invalid cursor"))?;
    let id = parts
        .next()
        .ok_or_else(|| AppError::bad_request("invalid cursor"))?;

    let timestamp = OffsetDateTime::parse(timestamp, &Rfc3339)
        .map_err(|_| AppError::bad_request("invalid cursor"))?;
    let id = Uuid::parse_str(id).map_err(|_| AppError::bad_request("invalid cursor"))?;

    Ok(Some((timestamp, id)))
}

fn encode_cursor(cursor: Option<(OffsetDateTime, Uuid)>) -> Option<String> {
    let (timestamp, id) = cursor?;
    let timestamp = timestamp.format(&Rfc3339).ok()?;
    Some(format!("{}/{}", timestamp, id))
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db = state.db.ping().await.is_ok();
    let storage = state.storage.ping().await.is_ok();
    let status = if db && storage { "ok" } else { "degraded" };

    Json(HealthResponse { status })
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreateProfileRequest {
    pub account_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub birth_date: Option<Date>,
}

pub async fn create_profile(
    State(state): State<AppState>,
    Json(payload): Json<CreateProfileRequest>,
) -> Result<Json<ProfileView>, AppError> {
    if payload.username.trim().is_empty()
        || payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
    {
        return Err(AppError::bad_request(
            "username, first_name and last_name are required",
        ));
    }
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(AppError::bad_request("a valid email is required"));
    }

    let service = ProfileService::new(state.db.clone());
    let profile = service
        .create(NewProfile {
            account_id: payload.account_id,
            username: payload.username,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            bio: payload.bio,
            birth_date: payload.birth_date,
        })
        .await
        .map_err(|err| {
            AppError::from_db(
                err,
                "a profile with this email or account already exists",
                "referenced account not found",
                "failed to create profile",
            )
        })?;

    Ok(Json(profile.into()))
}

pub async fn list_profiles(
    Query(query): Query<OffsetQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileView>>, AppError> {
    let limit = page_limit(query.limit);
    let offset = query.offset.unwrap_or(0).max(0);

    let service = ProfileService::new(state.db.clone());
    let profiles = service.list(limit, offset).await.map_err(|err| {
        tracing::error!(error = ?err, "failed to list profiles");
        AppError::internal("failed to list profiles")
    })?;

    Ok(Json(profiles.into_iter().map(ProfileView::from).collect()))
}

pub async fn get_profile(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<ProfileView>, AppError> {
    let service = ProfileService::new(state.db.clone());
    let profile = service.get(id).await.map_err(|err| {
        tracing::error!(error = ?err, profile_id = %id, "failed to fetch profile");
        AppError::internal("failed to fetch profile")
    })?;

    match profile {
        Some(profile) => Ok(Json(profile.into())),
        None => Err(AppError::not_found("profile not found")),
    }
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub birth_date: Option<Date>,
}

pub async fn update_profile(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileView>, AppError> {
    for (field, value) in [
        ("username", &payload.username),
        ("first_name", &payload.first_name),
        ("last_name", &payload.last_name),
    ] {
        if let Some(value) = value {
            if value.trim().is_empty() {
                return Err(AppError::bad_request(format!("{} must not be empty", field)));
            }
        }
    }
    if let Some(email) = &payload.email {
        if email.trim().is_empty() || !email.contains('@') {
            return Err(AppError::bad_request("a valid email is required"));
        }
    }

    let service = ProfileService::new(state.db.clone());
    let profile = service
        .update(
            id,
            ProfileChanges {
                username: payload.username,
                first_name: payload.first_name,
                last_name: payload.last_name,
                email: payload.email,
                bio: payload.bio,
                birth_date: payload.birth_date,
            },
        )
        .await
        .map_err(|err| {
            AppError::from_db(
                err,
                "a profile with this email already exists",
                "profile not found",
                "failed to update profile",
            )
        })?;

    match profile {
        Some(profile) => Ok(Json(profile.into())),
        None => Err(AppError::not_found("profile not found")),
    }
}

pub async fn delete_profile(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let service = ProfileService::new(state.db.clone());
    let deleted = service.delete(id).await.map_err(|err| {
        tracing::error!(error = ?err, profile_id = %id, "failed to delete profile");
        AppError::internal("failed to delete profile")
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("profile not found"))
    }
}

// ---------------------------------------------------------------------------
// Pictures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct PictureQuery {
    pub filename: Option<String>,
}

fn picture_upload_checks(
    state: &AppState,
    filename: &Option<String>,
    body: &Bytes,
) -> Result<(), AppError> {
    let filename = filename.as_deref().unwrap_or_default();
    if filename.trim().is_empty() {
        return Err(AppError::bad_request("filename query parameter is required"));
    }
    if body.is_empty() {
        return Err(AppError::bad_request("picture body is empty"));
    }
    if body.len() as i64 > state.upload_max_bytes {
        return Err(AppError::payload_too_large(
            "picture exceeds the upload size limit",
        ));
    }
    Ok(())
}

fn body_content_type(headers: &HeaderMap) -> String {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string()
}

pub async fn upload_profile_picture(
    Path(id): Path<Uuid>,
    Query(query): Query<PictureQuery>,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ProfileView>, AppError> {
    picture_upload_checks(&state, &query.filename, &body)?;
    let filename = query.filename.unwrap_or_default();
    let content_type = body_content_type(&headers);

    let service = PictureService::new(state.db.clone(), state.storage.clone());
    let profile = service
        .attach_profile_picture(id, filename.trim(), &content_type, body.to_vec())
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, profile_id = %id, "failed to store profile picture");
            AppError::internal("failed to store profile picture")
        })?;

    match profile {
        Some(profile) => Ok(Json(profile.into())),
        None => Err(AppError::not_found("profile not found")),
    }
}

pub async fn upload_post_picture(
    Path(id): Path<Uuid>,
    Query(query): Query<PictureQuery>,
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Post>, AppError> {
    picture_upload_checks(&state, &query.filename, &body)?;
    let filename = query.filename.unwrap_or_default();
    let content_type = body_content_type(&headers);

    let service = PictureService::new(state.db.clone(), state.storage.clone());
    let post = service
        .attach_post_picture(id, filename.trim(), &content_type, body.to_vec())
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, post_id = %id, "failed to store post picture");
            AppError::internal("failed to store post picture")
        })?;

    match post {
        Some(post) => Ok(Json(post)),
        None => Err(AppError::not_found("post not found")),
    }
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct FollowRequest {
    pub follower_id: Uuid,
}

#[derive(Serialize)]
pub struct UnfollowResponse {
    pub unfollowed: bool,
}

#[derive(Serialize)]
pub struct RelationshipEdgeView {
    pub profile: ProfileView,
    #[serde(with = "time::serde::rfc3339")]
    pub followed_at: OffsetDateTime,
}

impl From<RelationshipEdge> for RelationshipEdgeView {
    fn from(edge: RelationshipEdge) -> Self {
        Self {
            profile: edge.profile.into(),
            followed_at: edge.followed_at,
        }
    }
}

pub async fn follow_profile(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<FollowRequest>,
) -> Result<Json<Relationship>, AppError> {
    if payload.follower_id == id {
        return Err(AppError::bad_request("cannot follow yourself"));
    }

    let service = SocialService::new(state.db.clone());
    let relationship = service.follow(payload.follower_id, id).await.map_err(|err| {
        AppError::from_db(
            err,
            "already following this profile",
            "profile not found",
            "failed to follow profile",
        )
    })?;

    Ok(Json(relationship))
}

pub async fn unfollow_profile(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<FollowRequest>,
) -> Result<Json<UnfollowResponse>, AppError> {
    let service = SocialService::new(state.db.clone());
    let unfollowed = service
        .unfollow(payload.follower_id, id)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, profile_id = %id, "failed to unfollow profile");
            AppError::internal("failed to unfollow profile")
        })?;

    Ok(Json(UnfollowResponse { unfollowed }))
}

pub async fn list_followers(
    Path(id): Path<Uuid>,
    Query(query): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> Result<Json<ListResponse<RelationshipEdgeView>>, AppError> {
    let limit = page_limit(query.limit);
    let cursor = parse_cursor(query.cursor)?;

    let service = SocialService::new(state.db.clone());
    let edges = service.list_followers(id, cursor, limit).await.map_err(|err| {
        tracing::error!(error = ?err, profile_id = %id, "failed to list followers");
        AppError::internal("failed to list followers")
    })?;

    let next_cursor = if edges.len() as i64 == limit {
        edges
            .last()
            .map(|edge| (edge.followed_at, edge.relationship_id))
    } else {
        None
    };

    Ok(Json(ListResponse {
        items: edges.into_iter().map(RelationshipEdgeView::from).collect(),
        next_cursor: encode_cursor(next_cursor),
    }))
}

pub async fn list_following(
    Path(id): Path<Uuid>,
    Query(query): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> Result<Json<ListResponse<RelationshipEdgeView>>, AppError> {
    let limit = page_limit(query.limit);
    let cursor = parse_cursor(query.cursor)?;

    let service = SocialService::new(state.db.clone());
    let edges = service.list_following(id, cursor, limit).await.map_err(|err| {
        tracing::error!(error = ?err, profile_id = %id, "failed to list following");
        AppError::internal("failed to list following")
    })?;

    let next_cursor = if edges.len() as i64 == limit {
        edges
            .last()
            .map(|edge| (edge.followed_at, edge.relationship_id))
    } else {
        None
    };

    Ok(Json(ListResponse {
        items: edges.into_iter().map(RelationshipEdgeView::from).collect(),
        next_cursor: encode_cursor(next_cursor),
    }))
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub author_id: Uuid,
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdatePostRequest {
    pub author_id: Uuid,
    pub content: String,
}

#[derive(Deserialize)]
pub struct DeletePostRequest {
    pub author_id: Uuid,
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<Post>, AppError> {
    if payload.content.trim().is_empty() {
        return Err(AppError::bad_request("content is required"));
    }

    let service = PostService::new(state.db.clone());
    let post = service
        .create(payload.author_id, payload.content)
        .await
        .map_err(|err| {
            AppError::from_db(
                err,
                "post already exists",
                "author profile not found",
                "failed to create post",
            )
        })?;

    Ok(Json(post))
}

pub async fn get_post(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<Post>, AppError> {
    let service = PostService::new(state.db.clone());
    let post = service.get(id).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to fetch post");
        AppError::internal("failed to fetch post")
    })?;

    match post {
        Some(post) => Ok(Json(post)),
        None => Err(AppError::not_found("post not found")),
    }
}

pub async fn update_post_content(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<Post>, AppError> {
    if payload.content.trim().is_empty() {
        return Err(AppError::bad_request("content is required"));
    }

    let service = PostService::new(state.db.clone());
    let post = service
        .update_content(id, payload.author_id, payload.content)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, post_id = %id, "failed to update post");
            AppError::internal("failed to update post")
        })?;

    match post {
        Some(post) => Ok(Json(post)),
        None => Err(AppError::not_found("post not found")),
    }
}

pub async fn delete_post(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<DeletePostRequest>,
) -> Result<StatusCode, AppError> {
    let service = PostService::new(state.db.clone());
    let deleted = service.delete(id, payload.author_id).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to delete post");
        AppError::internal("failed to delete post")
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("post not found"))
    }
}

pub async fn list_profile_posts(
    Path(id): Path<Uuid>,
    Query(query): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Post>>, AppError> {
    let limit = page_limit(query.limit);
    let cursor = parse_cursor(query.cursor)?;

    let service = PostService::new(state.db.clone());
    let posts = service.list_by_author(id, cursor, limit).await.map_err(|err| {
        tracing::error!(error = ?err, profile_id = %id, "failed to list posts");
        AppError::internal("failed to list posts")
    })?;

    let next_cursor = if posts.len() as i64 == limit {
        posts.last().map(|post| (post.created_at, post.id))
    } else {
        None
    };

    Ok(Json(ListResponse {
        items: posts,
        next_cursor: encode_cursor(next_cursor),
    }))
}

// ---------------------------------------------------------------------------
// Likes and comments
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct LikeRequest {
    pub profile_id: Uuid,
}

#[derive(Serialize)]
pub struct UnlikeResponse {
    pub unliked: bool,
}

#[derive(Deserialize)]
pub struct CommentRequest {
    pub author_id: Uuid,
    pub content: String,
}

#[derive(Deserialize)]
pub struct DeleteCommentRequest {
    pub author_id: Uuid,
}

pub async fn like_post(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<LikeRequest>,
) -> Result<Json<Like>, AppError> {
    let service = EngagementService::new(state.db.clone());
    let like = service.like(payload.profile_id, id).await.map_err(|err| {
        AppError::from_db(
            err,
            "post already liked by this profile",
            "post or profile not found",
            "failed to like post",
        )
    })?;

    Ok(Json(like))
}

pub async fn unlike_post(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<LikeRequest>,
) -> Result<Json<UnlikeResponse>, AppError> {
    let service = EngagementService::new(state.db.clone());
    let unliked = service.unlike(payload.profile_id, id).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to unlike post");
        AppError::internal("failed to unlike post")
    })?;

    Ok(Json(UnlikeResponse { unliked }))
}

pub async fn list_post_likes(
    Path(id): Path<Uuid>,
    Query(query): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Like>>, AppError> {
    let limit = page_limit(query.limit);
    let cursor = parse_cursor(query.cursor)?;

    let service = EngagementService::new(state.db.clone());
    let likes = service.list_likes(id, cursor, limit).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to list likes");
        AppError::internal("failed to list likes")
    })?;

    let next_cursor = if likes.len() as i64 == limit {
        likes.last().map(|like| (like.created_at, like.id))
    } else {
        None
    };

    Ok(Json(ListResponse {
        items: likes,
        next_cursor: encode_cursor(next_cursor),
    }))
}

pub async fn create_comment(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(payload): Json<CommentRequest>,
) -> Result<Json<Comment>, AppError> {
    if payload.content.trim().is_empty() {
        return Err(AppError::bad_request("content is required"));
    }

    let service = EngagementService::new(state.db.clone());
    let comment = service
        .comment(payload.author_id, id, payload.content)
        .await
        .map_err(|err| {
            AppError::from_db(
                err,
                "comment already exists",
                "post or profile not found",
                "failed to comment on post",
            )
        })?;

    Ok(Json(comment))
}

pub async fn list_post_comments(
    Path(id): Path<Uuid>,
    Query(query): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> Result<Json<ListResponse<Comment>>, AppError> {
    let limit = page_limit(query.limit);
    let cursor = parse_cursor(query.cursor)?;

    let service = EngagementService::new(state.db.clone());
    let comments = service.list_comments(id, cursor, limit).await.map_err(|err| {
        tracing::error!(error = ?err, post_id = %id, "failed to list comments");
        AppError::internal("failed to list comments")
    })?;

    let next_cursor = if comments.len() as i64 == limit {
        comments.last().map(|comment| (comment.created_at, comment.id))
    } else {
        None
    };

    Ok(Json(ListResponse {
        items: comments,
        next_cursor: encode_cursor(next_cursor),
    }))
}

pub async fn delete_comment(
    Path((id, comment_id)): Path<(Uuid, Uuid)>,
    State(state): State<AppState>,
    Json(payload): Json<DeleteCommentRequest>,
) -> Result<StatusCode, AppError> {
    let service = EngagementService::new(state.db.clone());
    let deleted = service
        .delete_comment(comment_id, id, payload.author_id)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, comment_id = %comment_id, "failed to delete comment");
            AppError::internal("failed to delete comment")
        })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("comment not found"))
    }
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct AdminPageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Serialize)]
pub struct AdminPageResponse {
    pub items: Vec<Value>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

fn admin_entity(slug: &str) -> Result<AdminEntity, AppError> {
    AdminEntity::from_slug(slug).ok_or_else(|| AppError::not_found("unknown admin entity"))
}

pub async fn admin_list(
    _admin: AdminToken,
    Path(entity): Path<String>,
    Query(query): Query<AdminPageQuery>,
    State(state): State<AppState>,
) -> Result<Json<AdminPageResponse>, AppError> {
    let entity = admin_entity(&entity)?;
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(50).clamp(1, 200);

    let service = AdminService::new(state.db.clone());
    let listing = service.list(entity, page, per_page).await.map_err(|err| {
        tracing::error!(error = ?err, entity = entity.slug(), "failed to list rows");
        AppError::internal("failed to list rows")
    })?;

    Ok(Json(AdminPageResponse {
        items: listing.items,
        total: listing.total,
        page: listing.page,
        per_page: listing.per_page,
    }))
}

pub async fn admin_get(
    _admin: AdminToken,
    Path((entity, id)): Path<(String, Uuid)>,
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let entity = admin_entity(&entity)?;

    let service = AdminService::new(state.db.clone());
    let row = service.get(entity, id).await.map_err(|err| {
        tracing::error!(error = ?err, entity = entity.slug(), "failed to fetch row");
        AppError::internal("failed to fetch row")
    })?;

    match row {
        Some(row) => Ok(Json(row)),
        None => Err(AppError::not_found("row not found")),
    }
}

pub async fn admin_update(
    _admin: AdminToken,
    Path((entity, id)): Path<(String, Uuid)>,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let entity = admin_entity(&entity)?;

    let Some(object) = payload.as_object() else {
        return Err(AppError::bad_request("expected a JSON object of column values"));
    };
    if object.is_empty() {
        return Err(AppError::bad_request("no columns provided"));
    }

    let mut changes: Vec<(&'static str, Option<String>)> = Vec::with_capacity(object.len());
    for (column, value) in object {
        let Some(column) = entity
            .editable_columns()
            .iter()
            .copied()
            .find(|candidate| *candidate == column.as_str())
        else {
            return Err(AppError::bad_request(format!(
                "column {} is not editable",
                column
            )));
        };
        let value = match value {
            Value::String(value) => Some(value.clone()),
            Value::Null => None,
            _ => {
                return Err(AppError::bad_request(format!(
                    "column {} expects a string value",
                    column
                )))
            }
        };
        changes.push((column, value));
    }

    let service = AdminService::new(state.db.clone());
    let row = service.update(entity, id, &changes).await.map_err(|err| {
        AppError::from_db(
            err,
            "a row with these values already exists",
            "row not found",
            "failed to update row",
        )
    })?;

    match row {
        Some(row) => Ok(Json(row)),
        None => Err(AppError::not_found("row not found")),
    }
}

pub async fn admin_delete(
    _admin: AdminToken,
    Path((entity, id)): Path<(String, Uuid)>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let entity = admin_entity(&entity)?;

    let service = AdminService::new(state.db.clone());
    let deleted = service.delete(entity, id).await.map_err(|err| {
        tracing::error!(error = ?err, entity = entity.slug(), "failed to delete row");
        AppError::internal("failed to delete row")
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("row not found"))
    }
}

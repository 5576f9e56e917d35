//! Admin Surface Tests
//!
//! Covers the token gate and the generic listing/editing/deletion CRUD
//! over every registered entity.

mod common;

use axum::http::StatusCode;
use common::app;
use serde_json::json;
use uuid::Uuid;

// ===========================================================================
// Token gate
// ===========================================================================

#[tokio::test]
async fn admin_requires_token() {
    let app = app().await;

    let resp = app.get_admin("/admin/profiles", None).await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = app.get_admin("/admin/profiles", Some("wrong-token")).await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let resp = app
        .get_admin("/admin/profiles", Some(app.admin_token()))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn admin_unknown_entity() {
    let app = app().await;
    let resp = app
        .get_admin("/admin/accounts", Some(app.admin_token()))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

// ===========================================================================
// Listing
// ===========================================================================

#[tokio::test]
async fn admin_lists_every_entity() {
    let app = app().await;
    let alice = app.create_profile("adm_all_a").await;
    let bob = app.create_profile("adm_all_b").await;
    app.create_relationship_at(alice.id, bob.id, 1).await;
    let post_id = app.create_post_for(alice.id).await;
    app.create_comment_at(bob.id, post_id, "hi", 1).await;
    app.post_json(
        &format!("/v1/posts/{}/likes", post_id),
        json!({ "profile_id": bob.id }),
    )
    .await;

    for entity in ["profiles", "relationships", "posts", "comments", "likes"] {
        let resp = app
            .get_admin(&format!("/admin/{}", entity), Some(app.admin_token()))
            .await;
        assert_eq!(resp.status, StatusCode::OK, "listing {}", entity);
        let body = resp.json();
        assert!(body["total"].as_i64().unwrap() >= 1, "{} is empty", entity);
        assert!(!body["items"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn admin_listing_paginates() {
    let app = app().await;
    let author = app.create_profile("adm_page").await;
    for index in 0..3 {
        app.create_post_at(author.id, &format!("adm post {}", index), 30 - index)
            .await;
    }

    let resp = app
        .get_admin("/admin/posts?page=1&per_page=2", Some(app.admin_token()))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let first = resp.json();
    assert_eq!(first["items"].as_array().unwrap().len(), 2);
    assert_eq!(first["page"].as_i64().unwrap(), 1);

    let resp = app
        .get_admin("/admin/posts?page=2&per_page=2", Some(app.admin_token()))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let second = resp.json();
    assert!(second["total"].as_i64().unwrap() >= 3);
    assert_ne!(
        first["items"][0]["id"].as_str(),
        second["items"][0]["id"].as_str()
    );
}

#[tokio::test]
async fn admin_get_row() {
    let app = app().await;
    let profile = app.create_profile("adm_get").await;

    let resp = app
        .get_admin(
            &format!("/admin/profiles/{}", profile.id),
            Some(app.admin_token()),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["email"].as_str().unwrap(), profile.email);

    let resp = app
        .get_admin(
            &format!("/admin/profiles/{}", Uuid::new_v4()),
            Some(app.admin_token()),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

// ===========================================================================
// Editing
// ===========================================================================

#[tokio::test]
async fn admin_edits_post_content() {
    let app = app().await;
    let author = app.create_profile("adm_edit").await;
    let post_id = app.create_post_for(author.id).await;

    let resp = app
        .patch_admin(
            &format!("/admin/posts/{}", post_id),
            json!({ "content": "edited by staff" }),
            Some(app.admin_token()),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["content"].as_str().unwrap(), "edited by staff");

    // visible through the public API as well
    let resp = app.get(&format!("/v1/posts/{}", post_id)).await;
    assert_eq!(resp.json()["content"].as_str().unwrap(), "edited by staff");
}

#[tokio::test]
async fn admin_edit_rejects_unknown_column() {
    let app = app().await;
    let profile = app.create_profile("adm_badcol").await;

    let resp = app
        .patch_admin(
            &format!("/admin/profiles/{}", profile.id),
            json!({ "created_at": "2000-01-01T00:00:00Z" }),
            Some(app.admin_token()),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_edit_rejects_edge_entities() {
    let app = app().await;
    let alice = app.create_profile("adm_edge_a").await;
    let bob = app.create_profile("adm_edge_b").await;
    let relationship_id = app.create_relationship_at(alice.id, bob.id, 1).await;

    let resp = app
        .patch_admin(
            &format!("/admin/relationships/{}", relationship_id),
            json!({ "follower_id": Uuid::new_v4() }),
            Some(app.admin_token()),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_edit_duplicate_email_conflicts() {
    let app = app().await;
    let first = app.create_profile("adm_email_a").await;
    let second = app.create_profile("adm_email_b").await;

    let resp = app
        .patch_admin(
            &format!("/admin/profiles/{}", second.id),
            json!({ "email": first.email }),
            Some(app.admin_token()),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
}

// ===========================================================================
// Deletion
// ===========================================================================

#[tokio::test]
async fn admin_deletes_row() {
    let app = app().await;
    let alice = app.create_profile("adm_del_a").await;
    let bob = app.create_profile("adm_del_b").await;
    let relationship_id = app.create_relationship_at(alice.id, bob.id, 1).await;

    let resp = app
        .delete_admin(
            &format!("/admin/relationships/{}", relationship_id),
            Some(app.admin_token()),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = app
        .delete_admin(
            &format!("/admin/relationships/{}", relationship_id),
            Some(app.admin_token()),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_profile_delete_cascades() {
    let app = app().await;
    let profile = app.create_profile("adm_casc").await;
    let post_id = app.create_post_for(profile.id).await;

    let resp = app
        .delete_admin(
            &format!("/admin/profiles/{}", profile.id),
            Some(app.admin_token()),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    assert_eq!(app.count_where("posts", "id", post_id).await, 0);
}

//! Profile CRUD Tests
//!
//! Covers profile creation, the derived full name, listing order,
//! and cascade deletion.

mod common;

use axum::http::StatusCode;
use common::app;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn health_endpoint_responds() {
    let app = app().await;
    let resp = app.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
}

// ===========================================================================
// Creation
// ===========================================================================

#[tokio::test]
async fn create_profile_returns_full_name() {
    let app = app().await;

    let resp = app
        .post_json(
            "/v1/profiles",
            json!({
                "account_id": Uuid::new_v4(),
                "username": "mquinn",
                "first_name": "Mallory",
                "last_name": "Quinn",
                "email": "prof_create@example.com",
                "bio": "hello there",
                "birth_date": "1990-04-21"
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["full_name"].as_str().unwrap(), "Mallory Quinn");
    assert_eq!(body["username"].as_str().unwrap(), "mquinn");
    assert_eq!(body["bio"].as_str().unwrap(), "hello there");
    assert_eq!(body["birth_date"].as_str().unwrap(), "1990-04-21");
}

#[tokio::test]
async fn create_profile_requires_valid_email() {
    let app = app().await;

    let resp = app
        .post_json(
            "/v1/profiles",
            json!({
                "account_id": Uuid::new_v4(),
                "username": "bademail",
                "first_name": "Bad",
                "last_name": "Email",
                "email": "not-an-email"
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_profile_requires_names() {
    let app = app().await;

    let resp = app
        .post_json(
            "/v1/profiles",
            json!({
                "account_id": Uuid::new_v4(),
                "username": "noname",
                "first_name": "  ",
                "last_name": "Person",
                "email": "prof_noname@example.com"
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_profile_duplicate_email_conflicts() {
    let app = app().await;

    let payload = |account: Uuid| {
        json!({
            "account_id": account,
            "username": "dupemail",
            "first_name": "Dup",
            "last_name": "Email",
            "email": "prof_dup@example.com"
        })
    };

    let resp = app.post_json("/v1/profiles", payload(Uuid::new_v4())).await;
    assert_eq!(resp.status, StatusCode::OK);

    let resp = app.post_json("/v1/profiles", payload(Uuid::new_v4())).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_profile_duplicate_account_conflicts() {
    let app = app().await;
    let account_id = Uuid::new_v4();

    let resp = app
        .post_json(
            "/v1/profiles",
            json!({
                "account_id": account_id,
                "username": "acct_one",
                "first_name": "First",
                "last_name": "Account",
                "email": "prof_acct1@example.com"
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    // The account link is one-to-one
    let resp = app
        .post_json(
            "/v1/profiles",
            json!({
                "account_id": account_id,
                "username": "acct_two",
                "first_name": "Second",
                "last_name": "Account",
                "email": "prof_acct2@example.com"
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
}

// ===========================================================================
// Fetch and update
// ===========================================================================

#[tokio::test]
async fn get_profile_not_found() {
    let app = app().await;
    let resp = app.get(&format!("/v1/profiles/{}", Uuid::new_v4())).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_profile_changes_fields() {
    let app = app().await;
    let profile = app.create_profile("prof_update").await;

    let resp = app
        .patch_json(
            &format!("/v1/profiles/{}", profile.id),
            json!({
                "last_name": "Renamed",
                "bio": "updated bio",
                "birth_date": "1985-12-03"
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["full_name"].as_str().unwrap(), "Test Renamed");
    assert_eq!(body["bio"].as_str().unwrap(), "updated bio");
    assert_eq!(body["birth_date"].as_str().unwrap(), "1985-12-03");
    // untouched fields keep their values
    assert_eq!(body["username"].as_str().unwrap(), profile.username);
}

#[tokio::test]
async fn update_profile_duplicate_email_conflicts() {
    let app = app().await;
    let first = app.create_profile("prof_upd_email_a").await;
    let second = app.create_profile("prof_upd_email_b").await;

    let resp = app
        .patch_json(
            &format!("/v1/profiles/{}", second.id),
            json!({ "email": first.email }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_profile_not_found() {
    let app = app().await;
    let resp = app
        .patch_json(
            &format!("/v1/profiles/{}", Uuid::new_v4()),
            json!({ "bio": "ghost" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

// ===========================================================================
// Listing order
// ===========================================================================

#[tokio::test]
async fn list_profiles_ordered_by_name() {
    let app = app().await;
    let young = app.create_named_profile("ord_young", "Abel", "Young").await;
    let zimmer = app
        .create_named_profile("ord_zimmer", "Abel", "Zimmer")
        .await;
    let adams = app.create_named_profile("ord_adams", "Beth", "Adams").await;

    let resp = app.get("/v1/profiles?limit=100").await;
    assert_eq!(resp.status, StatusCode::OK);

    let body = resp.json();
    let items = body.as_array().expect("expected a JSON array");
    let position = |id: Uuid| {
        items
            .iter()
            .position(|item| item["id"].as_str() == Some(id.to_string().as_str()))
            .unwrap_or_else(|| panic!("profile {} missing from listing", id))
    };

    // (first_name, last_name) ordering: Abel Young < Abel Zimmer < Beth Adams
    assert!(position(young.id) < position(zimmer.id));
    assert!(position(zimmer.id) < position(adams.id));
}

// ===========================================================================
// Deletion cascades
// ===========================================================================

#[tokio::test]
async fn delete_profile_cascades() {
    let app = app().await;
    let alice = app.create_profile("casc_alice").await;
    let bob = app.create_profile("casc_bob").await;

    // follow edges in both directions
    app.create_relationship_at(alice.id, bob.id, 2).await;
    app.create_relationship_at(bob.id, alice.id, 1).await;

    // alice posts; bob engages with it
    let post_id = app.create_post_for(alice.id).await;
    app.create_comment_at(bob.id, post_id, "nice", 1).await;
    let resp = app
        .post_json(
            &format!("/v1/posts/{}/likes", post_id),
            json!({ "profile_id": bob.id }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    // alice also engages with bob's post
    let bob_post_id = app.create_post_for(bob.id).await;
    app.create_comment_at(alice.id, bob_post_id, "thanks", 1).await;

    let resp = app.delete(&format!("/v1/profiles/{}", alice.id)).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    // everything referencing alice is gone
    assert_eq!(app.count_where("posts", "author_id", alice.id).await, 0);
    assert_eq!(app.count_where("comments", "author_id", alice.id).await, 0);
    assert_eq!(app.count_where("likes", "profile_id", alice.id).await, 0);
    assert_eq!(
        app.count_where("relationships", "follower_id", alice.id).await,
        0
    );
    assert_eq!(
        app.count_where("relationships", "followed_id", alice.id).await,
        0
    );
    // engagement on alice's posts went with the posts
    assert_eq!(app.count_where("comments", "post_id", post_id).await, 0);
    assert_eq!(app.count_where("likes", "post_id", post_id).await, 0);

    // bob and his post survive
    let resp = app.get(&format!("/v1/profiles/{}", bob.id)).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(app.count_where("posts", "id", bob_post_id).await, 1);
}

#[tokio::test]
async fn delete_profile_not_found() {
    let app = app().await;
    let resp = app.delete(&format!("/v1/profiles/{}", Uuid::new_v4())).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

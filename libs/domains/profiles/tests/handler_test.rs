//! Handler tests for the profiles router, over the in-memory store.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_profiles::{handlers, InMemoryProfileRepository, ProfileService};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn app(repo: &InMemoryProfileRepository) -> axum::Router {
    handlers::router(ProfileService::new(repo.clone()))
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn request_with_user(method: &str, uri: &str, user_id: Uuid, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", user_id.to_string())
        .header("content-type", "application/json");
    match body {
        Some(value) => builder
            .body(Body::from(serde_json::to_string(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn create_profile(app: &axum::Router, user_id: Uuid, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(request_with_user("POST", "/", user_id, Some(body)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn create_profile_requires_the_user_header() {
    let repo = InMemoryProfileRepository::new();
    let response = app(&repo)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "first_name": "Ada" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn a_user_gets_exactly_one_profile() {
    let repo = InMemoryProfileRepository::new();
    let router = app(&repo);
    let user_id = Uuid::now_v7();

    let created = create_profile(&router, user_id, json!({ "first_name": "Ada" })).await;
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["first_name"], "Ada");

    let response = router
        .clone()
        .oneshot(request_with_user(
            "POST",
            "/",
            user_id,
            Some(json!({ "first_name": "Grace" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "user already has a profile");
}

#[tokio::test]
async fn private_profiles_read_as_forbidden_by_id() {
    let repo = InMemoryProfileRepository::new();
    let router = app(&repo);
    let user_id = Uuid::now_v7();

    let created = create_profile(
        &router,
        user_id,
        json!({ "first_name": "Ada", "is_public": false }),
    )
    .await;
    let profile_id = created["data"]["id"].as_str().unwrap().to_string();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/{profile_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "profile is private");

    // distinct from a missing profile
    let response = router
        .oneshot(
            Request::builder()
                .uri(format!("/{}", Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owner_still_sees_a_private_profile() {
    let repo = InMemoryProfileRepository::new();
    let router = app(&repo);
    let user_id = Uuid::now_v7();

    create_profile(
        &router,
        user_id,
        json!({ "first_name": "Ada", "is_public": false }),
    )
    .await;

    let response = router
        .oneshot(request_with_user("GET", "/me", user_id, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["is_public"], false);
    assert_eq!(body["data"]["full_name"], "Ada");
}

#[tokio::test]
async fn update_is_a_partial_patch_over_http() {
    let repo = InMemoryProfileRepository::new();
    let router = app(&repo);
    let user_id = Uuid::now_v7();

    create_profile(
        &router,
        user_id,
        json!({ "first_name": "Ada", "last_name": "Lovelace", "location": "London" }),
    )
    .await;

    let response = router
        .clone()
        .oneshot(request_with_user(
            "PUT",
            "/",
            user_id,
            Some(json!({ "bio": "mathematician" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["bio"], "mathematician");
    assert_eq!(body["data"]["first_name"], "Ada");
    assert_eq!(body["data"]["location"], "London");
}

#[tokio::test]
async fn soft_deleted_profiles_leave_public_listings_but_keep_their_row() {
    let repo = InMemoryProfileRepository::new();
    let router = app(&repo);
    let user_id = Uuid::now_v7();

    create_profile(&router, user_id, json!({ "first_name": "Ada" })).await;

    let response = router
        .clone()
        .oneshot(request_with_user("DELETE", "/", user_id, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // gone from the public listing
    let response = router
        .clone()
        .oneshot(Request::builder().uri("/public").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // but the owner still finds it, inactive
    let response = router
        .oneshot(request_with_user("GET", "/me", user_id, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["is_active"], false);
}

#[tokio::test]
async fn search_requires_a_term() {
    let repo = InMemoryProfileRepository::new();

    let response = app(&repo)
        .oneshot(Request::builder().uri("/search?q=").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stats_report_the_breakdown() {
    let repo = InMemoryProfileRepository::new();
    let router = app(&repo);

    create_profile(&router, Uuid::now_v7(), json!({ "first_name": "Ada" })).await;
    create_profile(
        &router,
        Uuid::now_v7(),
        json!({ "first_name": "Grace", "is_public": false }),
    )
    .await;

    let response = router
        .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["data"]["total_active_profiles"], 2);
    assert_eq!(body["data"]["public_profiles"], 1);
    assert_eq!(body["data"]["private_profiles"], 1);
}

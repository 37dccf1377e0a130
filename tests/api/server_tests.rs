//! Server Endpoint Tests

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{gif, token_for, MultipartBody, TestApp};

const OWNER: i64 = 1;
const MEMBER: i64 = 2;

fn app_with_category() -> TestApp {
    let app = TestApp::new();
    app.directory.add_category(1, "Gaming");
    app
}

#[tokio::test]
async fn test_create_server_enrolls_owner() {
    let app = app_with_category();
    let token = token_for(OWNER);

    let (status, body) = app
        .json(
            Method::POST,
            "/api/servers",
            json!({"name": "Rustaceans", "category": 1, "description": "All things Rust"}),
            &token,
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["owner"], OWNER);
    assert_eq!(body["channel_server"], json!([]));

    let id = body["id"].as_i64().unwrap();
    let (_, listing) = app.get("/api/servers", Some(&token)).await;
    assert_eq!(listing[0]["id"], id);
}

#[tokio::test]
async fn test_create_server_with_unknown_category() {
    let app = app_with_category();

    let (status, body) = app
        .json(
            Method::POST,
            "/api/servers",
            json!({"name": "Rustaceans", "category": 7}),
            &token_for(OWNER),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 10007);
}

#[tokio::test]
async fn test_create_server_with_malformed_body() {
    let app = app_with_category();

    let (status, body) = app
        .json(
            Method::POST,
            "/api/servers",
            json!({"name": "Rustaceans", "category": "gaming"}),
            &token_for(OWNER),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 10002);
}

#[tokio::test]
async fn test_create_server_validates_name() {
    let app = app_with_category();

    let (status, body) = app
        .json(
            Method::POST,
            "/api/servers",
            json!({"name": "", "category": 1}),
            &token_for(OWNER),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("name"));
}

#[tokio::test]
async fn test_join_and_leave() {
    let app = app_with_category();
    app.directory.add_server(100, OWNER, 1);
    let token = token_for(MEMBER);

    let (status, _) = app
        .call(Method::PUT, "/api/servers/100/members/@me", &token)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app
        .call(Method::PUT, "/api/servers/100/members/@me", &token)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 10005);

    let (_, listing) = app.get("/api/servers", Some(&token)).await;
    assert_eq!(listing[0]["id"], 100);

    let (status, _) = app
        .call(Method::DELETE, "/api/servers/100/members/@me", &token)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listing) = app.get("/api/servers", Some(&token)).await;
    assert_eq!(listing, json!([]));
}

#[tokio::test]
async fn test_owner_cannot_leave() {
    let app = app_with_category();
    app.directory.add_server(100, OWNER, 1);

    let (status, _) = app
        .call(Method::DELETE, "/api/servers/100/members/@me", &token_for(OWNER))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_server_by_member_is_forbidden() {
    let app = app_with_category();
    app.directory.add_server(100, OWNER, 1);
    app.directory.add_member(100, MEMBER);

    let (status, _) = app
        .call(Method::DELETE, "/api/servers/100", &token_for(MEMBER))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.directory.server_ids(), vec![100]);
}

#[tokio::test]
async fn test_delete_server_removes_channel_files() {
    let app = app_with_category();
    app.directory.add_server(100, OWNER, 1);
    let token = token_for(OWNER);

    let form = MultipartBody::new()
        .text("name", "general")
        .text("topic", "chat")
        .file("icon", "icon.gif", &gif(16, 16));
    let (status, channel) = app
        .multipart(Method::POST, "/api/servers/100/channels", form, &token)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let icon = channel["icon"].as_str().unwrap().to_owned();
    assert!(app.files.contains(&icon));

    let (status, _) = app.call(Method::DELETE, "/api/servers/100", &token).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(app.directory.server_ids().is_empty());
    assert!(!app.files.contains(&icon));
}

#[tokio::test]
async fn test_delete_missing_server_is_not_found() {
    let app = app_with_category();

    let (status, _) = app
        .call(Method::DELETE, "/api/servers/404", &token_for(OWNER))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

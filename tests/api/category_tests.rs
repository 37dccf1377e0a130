//! Category Endpoint Tests

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;

use crate::common::{gif, token_for, MultipartBody, TestApp};

const ADMIN: i64 = 1;

#[tokio::test]
async fn test_list_categories_is_public() {
    let app = TestApp::new();
    app.directory.add_category(1, "Gaming");
    app.directory.add_category(2, "Music");

    let (status, body) = app.get("/api/categories", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Gaming", "Music"]);
}

#[tokio::test]
async fn test_create_category_with_icon() {
    let app = TestApp::new();
    let form = MultipartBody::new()
        .text("name", "Gaming")
        .text("description", "Games and gamers")
        .file("icon", "pad.PNG", &gif(128, 128));

    let (status, body) = app
        .multipart(Method::POST, "/api/categories", form, &token_for(ADMIN))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    let icon = format!("category/{}/category_icon/pad.PNG", id);
    assert_eq!(body["icon"], icon.as_str());
    assert!(app.files.contains(&icon));
}

#[tokio::test]
async fn test_create_category_requires_name() {
    let app = TestApp::new();
    let form = MultipartBody::new().text("description", "nameless");

    let (status, body) = app
        .multipart(Method::POST, "/api/categories", form, &token_for(ADMIN))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 10007);
}

#[tokio::test]
async fn test_create_category_rejects_bmp_icon() {
    let app = TestApp::new();
    let form = MultipartBody::new()
        .text("name", "Gaming")
        .file("icon", "pad.bmp", b"BM");

    let (status, _) = app
        .multipart(Method::POST, "/api/categories", form, &token_for(ADMIN))
        .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_create_category_requires_authentication() {
    let app = TestApp::new();

    let (status, _) = app.get("/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);

    let form = MultipartBody::new().text("name", "Gaming");
    let (status, _) = app
        .multipart(Method::POST, "/api/categories", form, "garbage-token")
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_category_replaces_icon() {
    let app = TestApp::new();
    let token = token_for(ADMIN);
    let form = MultipartBody::new()
        .text("name", "Gaming")
        .file("icon", "old.png", &gif(8, 8));
    let (_, created) = app
        .multipart(Method::POST, "/api/categories", form, &token)
        .await;
    let id = created["id"].as_i64().unwrap();
    let old_icon = created["icon"].as_str().unwrap().to_owned();

    let form = MultipartBody::new()
        .text("name", "Games")
        .file("icon", "new.png", &gif(8, 8));
    let (status, body) = app
        .multipart(Method::PATCH, &format!("/api/categories/{}", id), form, &token)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Games");
    assert!(!app.files.contains(&old_icon));
    assert!(app.files.contains(body["icon"].as_str().unwrap()));
}

#[tokio::test]
async fn test_delete_category_cascades() {
    let app = TestApp::new();
    app.directory.add_category(1, "Gaming");
    app.directory.add_server(100, ADMIN, 1);
    app.directory.add_channel(200, 100, ADMIN, "general");

    let (status, _) = app
        .call(Method::DELETE, "/api/categories/1", &token_for(ADMIN))
        .await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(app.directory.server_ids().is_empty());
    assert!(app.directory.channel(200).is_none());
}

#[tokio::test]
async fn test_delete_missing_category_is_not_found() {
    let app = TestApp::new();

    let (status, _) = app
        .call(Method::DELETE, "/api/categories/5", &token_for(ADMIN))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_multipart_body_gets_error_envelope() {
    let app = TestApp::new();

    let (status, body) = app
        .json(
            Method::POST,
            "/api/categories",
            serde_json::json!({ "name": "Gaming" }),
            &token_for(ADMIN),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 10002);
    assert!(body["message"].is_string());
}

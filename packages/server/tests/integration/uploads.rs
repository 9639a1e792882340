use crate::common::{TestApp, routes};
use serde_json::json;

fn valid_body() -> serde_json::Value {
    json!({
        "filename": "driver-swing.mp4",
        "content_type": "video/mp4",
    })
}

#[tokio::test]
async fn issues_a_credential_with_the_documented_expiry() {
    let app = TestApp::spawn().await;
    let session = app.session("player@example.com");

    let res = app.post(routes::UPLOADS, &valid_body(), Some(&session)).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["expires_in"], 600);

    let key = res.body["key"].as_str().unwrap();
    assert!(key.starts_with(&format!("users/{}/", session.user_id)), "{key}");
    assert!(key.ends_with(".mp4"), "{key}");

    let url = res.body["upload_url"].as_str().unwrap();
    assert!(url.contains("expires=600"), "{url}");

    let public_url = res.body["public_url"].as_str().unwrap();
    assert_eq!(public_url, &format!("https://cdn.test.example/{key}"));
}

#[tokio::test]
async fn keys_are_unique_per_call() {
    let app = TestApp::spawn().await;
    let session = app.session("player@example.com");

    let first = app.post(routes::UPLOADS, &valid_body(), Some(&session)).await;
    let second = app.post(routes::UPLOADS, &valid_body(), Some(&session)).await;

    assert_ne!(first.body["key"], second.body["key"]);
}

#[tokio::test]
async fn missing_fields_are_a_validation_error() {
    let app = TestApp::spawn().await;
    let session = app.session("player@example.com");

    let res = app
        .post(routes::UPLOADS, &json!({"filename": "swing.mp4"}), Some(&session))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");

    let res = app
        .post(
            routes::UPLOADS,
            &json!({"filename": "   ", "content_type": "video/mp4"}),
            Some(&session),
        )
        .await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn requires_a_session() {
    let app = TestApp::spawn().await;

    let res = app.post(routes::UPLOADS, &valid_body(), None).await;

    assert_eq!(res.status, 401);
}

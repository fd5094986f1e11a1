mod common;

use auth::AccessClaims;
use auth::TokenSigner;
use common::TestApp;
use common::FACEBOOK_TOKEN;
use common::JWT_SECRET;
use reqwest::StatusCode;
use reqwest::Url;
use serde_json::json;

async fn register(app: &TestApp, email: &str, password: &str) -> reqwest::Response {
    app.post("/v1/auth/register")
        .json(&json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute request")
}

async fn login(app: &TestApp, email: &str, password: &str) -> reqwest::Response {
    app.post("/v1/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to execute request")
}

async fn token_claims(response: reqwest::Response) -> AccessClaims {
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().expect("Missing token");
    TokenSigner::new(JWT_SECRET)
        .verify(token)
        .expect("Issued token does not verify")
}

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::spawn().await;

    let response = register(&app, "ada@example.com", "analytical-engine").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let registered = token_claims(response).await;
    assert_eq!(registered.email, "ada@example.com");

    let response = login(&app, "ada@example.com", "analytical-engine").await;
    assert_eq!(response.status(), StatusCode::OK);
    let logged_in = token_claims(response).await;
    assert_eq!(logged_in.sub, registered.sub);
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_email() {
    let app = TestApp::spawn().await;
    register(&app, "ada@example.com", "analytical-engine").await;

    let response = login(&app, "ADA@Example.com", "analytical-engine").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    register(&app, "ada@example.com", "analytical-engine").await;

    let response = login(&app, "ada@example.com", "difference-engine").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 401);
    assert_eq!(body["data"]["message"], "Invalid credentials");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    register(&app, "ada@example.com", "analytical-engine").await;

    let response = register(&app, "ada@example.com", "another-password").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
    assert_eq!(app.users.count(), 1);
}

#[tokio::test]
async fn test_register_weak_password() {
    let app = TestApp::spawn().await;

    let response = register(&app, "ada@example.com", "short").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("minimum 8 characters"));
    assert_eq!(app.users.count(), 0);
}

#[tokio::test]
async fn test_register_missing_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/v1/auth/register")
        .json(&json!({ "email": "ada@example.com", "password": "analytical-engine" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.users.count(), 0);
}

#[tokio::test]
async fn test_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/v1/auth/login")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 400);
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/v1/password/forgot")
        .json(&json!({ "email": "nobody@example.com", "link": "https://app.example.com/reset" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_password_reset_round() {
    let app = TestApp::spawn().await;
    register(&app, "ada@example.com", "analytical-engine").await;

    let response = app
        .post("/v1/password/forgot")
        .json(&json!({
            "email": "ada@example.com",
            "link": "https://app.example.com/reset?lang=en"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await.unwrap().is_empty());

    let link = app
        .mailer
        .last_link_for("ada@example.com")
        .expect("No reset link sent");
    let link = Url::parse(&link).expect("Reset link is not a URL");
    let token = link
        .query_pairs()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .expect("Reset link carries no token");
    assert!(link.query_pairs().any(|(key, value)| key == "lang" && value == "en"));

    let response = app
        .post("/v1/password/reset")
        .json(&json!({ "token": token, "password": "difference-engine" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await.unwrap().is_empty());

    let response = login(&app, "ada@example.com", "difference-engine").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = login(&app, "ada@example.com", "analytical-engine").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Token is single-use
    let response = app
        .post("/v1/password/reset")
        .json(&json!({ "token": token, "password": "third-password" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reset_password_garbage_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/v1/password/reset")
        .json(&json!({ "token": "t1", "password": "newpassword" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_facebook() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/v1/auth/register-fb")
        .json(&json!({ "accessToken": FACEBOOK_TOKEN }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let first = token_claims(response).await;
    assert_eq!(first.email, "grace@example.com");

    // Same Facebook profile maps to the same account
    let response = app
        .post("/v1/auth/register-fb")
        .json(&json!({ "accessToken": FACEBOOK_TOKEN }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let second = token_claims(response).await;
    assert_eq!(second.sub, first.sub);
    assert_eq!(app.users.count(), 1);

    // Facebook accounts have no password to log in with
    let response = login(&app, "grace@example.com", "anything-goes").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_register_facebook_concurrent_requests_share_account() {
    let app = TestApp::spawn().await;

    let requests = (0..6).map(|_| {
        app.post("/v1/auth/register-fb")
            .json(&json!({ "accessToken": FACEBOOK_TOKEN }))
            .send()
    });
    let responses = futures::future::join_all(requests).await;

    let mut subjects = Vec::new();
    for response in responses {
        let response = response.expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::CREATED);
        subjects.push(token_claims(response).await.sub);
    }
    subjects.dedup();
    assert_eq!(subjects.len(), 1);
    assert_eq!(app.users.count(), 1);
}

#[tokio::test]
async fn test_register_facebook_rejected_token() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/v1/auth/register-fb")
        .json(&json!({ "accessToken": "forged" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.users.count(), 0);
}

#[tokio::test]
async fn test_register_facebook_email_taken() {
    let app = TestApp::spawn().await;
    register(&app, "grace@example.com", "compiler-pioneer").await;

    let response = app
        .post("/v1/auth/register-fb")
        .json(&json!({ "accessToken": FACEBOOK_TOKEN }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

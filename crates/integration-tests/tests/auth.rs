//! Integration tests for login, session persistence and route guarding.

use catalog_admin_client::{ClientError, Guard};
use catalog_admin_integration_tests::{TEST_EMAIL, TEST_TOKEN, TestContext, category_json};
use secrecy::ExposeSecret;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_persists_session_across_restarts() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(body_json(json!({"email": TEST_EMAIL})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh-token"})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let dashboard = ctx.dashboard();
    assert!(!dashboard.hydrate().await);
    assert_eq!(dashboard.guard().await, Guard::RedirectToLogin);

    let grant = dashboard.login(TEST_EMAIL).await.expect("Login should succeed");
    assert_eq!(grant.token.expose_secret(), "fresh-token");
    assert_eq!(dashboard.guard().await, Guard::Allow);

    // A new process reads the saved session back
    let restarted = ctx.dashboard();
    assert_eq!(restarted.guard().await, Guard::Loading);
    assert!(restarted.hydrate().await);

    let state = restarted.store().snapshot().await;
    assert_eq!(
        state.auth.token.as_ref().map(|t| t.expose_secret().to_string()),
        Some("fresh-token".to_string())
    );
    assert_eq!(
        state.auth.email.as_ref().map(ToString::to_string),
        Some(TEST_EMAIL.to_string())
    );
}

#[tokio::test]
async fn test_failed_login_wipes_saved_session() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "User not found"})))
        .mount(&ctx.server)
        .await;

    let dashboard = ctx.signed_in().await;
    let err = dashboard
        .login("stranger@example.com")
        .await
        .expect_err("Login should fail");
    assert_eq!(err.to_string(), "User not found");

    let state = dashboard.store().snapshot().await;
    assert!(!state.auth.is_authenticated);
    assert_eq!(state.auth.error.as_deref(), Some("User not found"));
    assert!(!ctx.config.session_file.exists());
}

#[tokio::test]
async fn test_malformed_email_sends_nothing() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "t"})))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let dashboard = ctx.dashboard();
    dashboard.hydrate().await;
    let err = dashboard.login("not-an-email").await.expect_err("Should reject");
    assert!(matches!(err, ClientError::InvalidEmail(_)));
}

#[tokio::test]
async fn test_logout_removes_session_file() {
    let ctx = TestContext::new().await;
    let dashboard = ctx.signed_in().await;
    assert!(ctx.config.session_file.exists());

    dashboard.logout().await.expect("Logout should succeed");

    assert_eq!(dashboard.guard().await, Guard::RedirectToLogin);
    assert!(!ctx.config.session_file.exists());
    assert!(!ctx.dashboard().hydrate().await);
}

// ============================================================================
// Authenticated requests
// ============================================================================

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([category_json(1, "Shoes")])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let dashboard = ctx.signed_in().await;
    dashboard
        .fetch_categories(0, 2)
        .await
        .expect("Fetch should succeed");

    let state = dashboard.store().snapshot().await;
    assert_eq!(state.categories.list.items.len(), 1);
}

#[tokio::test]
async fn test_corrupt_session_file_is_ignored() {
    let ctx = TestContext::new().await;
    std::fs::write(&ctx.config.session_file, "{ not json").expect("Failed to write file");

    let dashboard = ctx.dashboard();
    assert!(!dashboard.hydrate().await);
    assert_eq!(dashboard.guard().await, Guard::RedirectToLogin);
}

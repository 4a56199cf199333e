//! End-to-end tests for the auth client
//!
//! Tests the status mapping and payload handling of login.

mod common;

use common::{
    TestServer, BROKEN_USER, LEGACY_PASS, LEGACY_USER, LEGACY_USER_TOKEN, TEST_PASS, TEST_USER,
    TEST_USER_ID, TEST_USER_TOKEN,
};
use streambox_client::auth::{AuthError, AuthService, DummyJsonAuthClient};
use streambox_client::UserId;

fn client_for(server: &TestServer) -> DummyJsonAuthClient {
    DummyJsonAuthClient::new(&server.auth_base_url(), 5).unwrap()
}

#[tokio::test]
async fn test_login_with_valid_credentials() {
    let server = TestServer::spawn().await;
    let auth = client_for(&server);

    let login = auth.login(TEST_USER, TEST_PASS).await.unwrap();

    assert_eq!(login.token.expose(), TEST_USER_TOKEN);
    assert_eq!(login.user.id, Some(UserId::from(TEST_USER_ID)));
    assert_eq!(login.user.username, TEST_USER);
    assert_eq!(login.user.display_name(), "Emily Johnson");
    assert_eq!(login.user.gender, "female");
}

#[tokio::test]
async fn test_login_with_invalid_password() {
    let server = TestServer::spawn().await;
    let auth = client_for(&server);

    let err = auth.login(TEST_USER, "wrong_password").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(err.to_string(), "Invalid username or password.");
}

#[tokio::test]
async fn test_login_with_nonexistent_user() {
    let server = TestServer::spawn().await;
    let auth = client_for(&server);

    let err = auth.login("nonexistent_user", "password").await.unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}

#[tokio::test]
async fn test_server_error_is_connectivity() {
    let server = TestServer::spawn().await;
    let auth = client_for(&server);

    let err = auth.login(BROKEN_USER, "password").await.unwrap_err();
    assert!(matches!(err, AuthError::Connectivity { .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_connectivity() {
    let auth = DummyJsonAuthClient::new("http://127.0.0.1:9/auth", 2).unwrap();

    let err = auth.login(TEST_USER, TEST_PASS).await.unwrap_err();
    assert!(matches!(err, AuthError::Connectivity { .. }));
    assert_eq!(
        err.to_string(),
        "Login failed. Please check your internet connection."
    );
}

#[tokio::test]
async fn test_legacy_payload() {
    let server = TestServer::spawn().await;
    let auth = client_for(&server);

    let login = auth.login(LEGACY_USER, LEGACY_PASS).await.unwrap();

    assert_eq!(login.token.expose(), LEGACY_USER_TOKEN);
    assert_eq!(login.user.id, None);
    // empty email falls back to the username
    assert_eq!(login.user.email, LEGACY_USER);
}

#[tokio::test]
async fn test_register_is_local() {
    let auth = DummyJsonAuthClient::new("http://127.0.0.1:9/auth", 2).unwrap();

    let message = auth
        .register("Emily", "emily@example.com", "secret")
        .await
        .unwrap();
    assert_eq!(message, "Registration successful! Please login.");

    assert!(matches!(
        auth.register("Emily", "", "secret").await,
        Err(AuthError::MissingRegistrationFields)
    ));
}

mod common;

use auth::Claims;
use auth::JwtHandler;
use common::new_email;
use common::TestApp;
use common::APP_ID;
use common::APP_SECRET;
use common::DELTA_SECONDS;
use common::TOKEN_TTL_SECS;
use sso_service::proto::IsAdminRequest;
use sso_service::proto::LoginRequest;
use sso_service::proto::RegisterRequest;
use tonic::Code;

fn register_request(email: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn login_request(email: &str, password: &str, app_id: i32) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
        app_id,
    }
}

fn decode_claims(token: &str) -> Claims {
    JwtHandler::new(APP_SECRET.as_bytes())
        .expect("Failed to build JWT handler")
        .decode(token)
        .expect("Failed to decode token")
}

#[tokio::test]
async fn test_register_login_happy_path() {
    let mut app = TestApp::spawn().await;
    let email = new_email();

    let register = app
        .client
        .register(register_request(&email, "pass_word!"))
        .await
        .expect("Register failed")
        .into_inner();
    assert!(register.user_id > 0);

    let login = app
        .client
        .login(login_request(&email, "pass_word!", APP_ID))
        .await
        .expect("Login failed")
        .into_inner();
    assert!(!login.token.is_empty());

    let login_time = chrono::Utc::now().timestamp();
    let claims = decode_claims(&login.token);

    assert_eq!(claims.uid, register.user_id);
    assert_eq!(claims.email, email);
    assert_eq!(claims.app_id, APP_ID);
    assert!((claims.exp - (login_time + TOKEN_TTL_SECS)).abs() <= DELTA_SECONDS);
}

#[tokio::test]
async fn test_documented_scenario() {
    let mut app = TestApp::spawn().await;

    let user_id = app
        .client
        .register(register_request("a@x.com", "Secret123"))
        .await
        .expect("Register failed")
        .into_inner()
        .user_id;

    let token = app
        .client
        .login(login_request("a@x.com", "Secret123", APP_ID))
        .await
        .expect("Login failed")
        .into_inner()
        .token;

    let claims = decode_claims(&token);
    assert_eq!(claims.uid, user_id);
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.app_id, APP_ID);

    let is_admin = app
        .client
        .is_admin(IsAdminRequest { user_id })
        .await
        .expect("IsAdmin failed")
        .into_inner()
        .is_admin;
    assert!(!is_admin);

    let status = app
        .client
        .login(login_request("a@x.com", "wrong", APP_ID))
        .await
        .expect_err("Login with wrong password must fail");
    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "invalid email or password");

    let status = app
        .client
        .register(register_request("a@x.com", "Other456"))
        .await
        .expect_err("Duplicate register must fail");
    assert_eq!(status.code(), Code::AlreadyExists);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let mut app = TestApp::spawn().await;
    let email = new_email();

    app.client
        .register(register_request(&email, "pass_word!"))
        .await
        .expect("Register failed");

    let status = app
        .client
        .register(register_request(&email, "another_pass"))
        .await
        .expect_err("Duplicate register must fail");

    assert_eq!(status.code(), Code::AlreadyExists);
    assert_eq!(status.message(), "user already exists");

    // First password still works, second one was never stored
    app.client
        .login(login_request(&email, "pass_word!", APP_ID))
        .await
        .expect("Login with original password failed");

    let status = app
        .client
        .login(login_request(&email, "another_pass", APP_ID))
        .await
        .expect_err("Login with rejected password must fail");
    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_register_concurrent_duplicates() {
    let app = TestApp::spawn().await;
    let email = new_email();

    let mut tasks = Vec::new();
    for i in 0..5 {
        let mut client = app.client.clone();
        let request = register_request(&email, &format!("pass_word_{}", i));
        tasks.push(tokio::spawn(async move { client.register(request).await }));
    }

    let mut succeeded = 0;
    for task in tasks {
        match task.await.expect("Task panicked") {
            Ok(_) => succeeded += 1,
            Err(status) => assert_eq!(status.code(), Code::AlreadyExists),
        }
    }

    assert_eq!(succeeded, 1);
}

#[tokio::test]
async fn test_register_ids_are_distinct() {
    let mut app = TestApp::spawn().await;

    let first = app
        .client
        .register(register_request(&new_email(), "pass_word!"))
        .await
        .expect("Register failed")
        .into_inner()
        .user_id;
    let second = app
        .client
        .register(register_request(&new_email(), "pass_word!"))
        .await
        .expect("Register failed")
        .into_inner()
        .user_id;

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_register_invalid_input() {
    let mut app = TestApp::spawn().await;

    let cases = [
        ("", "pass_word!", "email is required"),
        ("not-an-email", "pass_word!", "Invalid email format"),
        ("nicola@example.com", "", "password is required"),
    ];

    for (email, password, message) in cases {
        let status = app
            .client
            .register(register_request(email, password))
            .await
            .expect_err("Invalid register must fail");

        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(
            status.message().contains(message),
            "unexpected message: {}",
            status.message()
        );
    }
}

#[tokio::test]
async fn test_login_wrong_password() {
    let mut app = TestApp::spawn().await;
    let email = new_email();

    app.client
        .register(register_request(&email, "pass_word!"))
        .await
        .expect("Register failed");

    let status = app
        .client
        .login(login_request(&email, "wrong_pass", APP_ID))
        .await
        .expect_err("Login must fail");

    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "invalid email or password");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let mut app = TestApp::spawn().await;

    let status = app
        .client
        .login(login_request(&new_email(), "pass_word!", APP_ID))
        .await
        .expect_err("Login must fail");

    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "invalid email or password");
}

#[tokio::test]
async fn test_login_email_is_case_sensitive() {
    let mut app = TestApp::spawn().await;

    app.client
        .register(register_request("Nicola@example.com", "pass_word!"))
        .await
        .expect("Register failed");

    let status = app
        .client
        .login(login_request("nicola@example.com", "pass_word!", APP_ID))
        .await
        .expect_err("Login must fail");

    assert_eq!(status.code(), Code::InvalidArgument);
}

#[tokio::test]
async fn test_login_unknown_app() {
    let mut app = TestApp::spawn().await;
    let email = new_email();

    app.client
        .register(register_request(&email, "pass_word!"))
        .await
        .expect("Register failed");

    let status = app
        .client
        .login(login_request(&email, "pass_word!", 999))
        .await
        .expect_err("Login must fail");

    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "invalid app_id");
}

#[tokio::test]
async fn test_login_invalid_input() {
    let mut app = TestApp::spawn().await;
    let email = new_email();

    let cases = [
        login_request("", "pass_word!", APP_ID),
        login_request(&email, "", APP_ID),
        login_request(&email, "pass_word!", 0),
    ];

    for request in cases {
        let status = app
            .client
            .login(request)
            .await
            .expect_err("Invalid login must fail");
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    let status = app
        .client
        .login(login_request(&email, "pass_word!", 0))
        .await
        .expect_err("Login without app must fail");
    assert_eq!(status.message(), "app_id is required");
}

#[tokio::test]
async fn test_is_admin_flag() {
    let mut app = TestApp::spawn().await;

    let user_id = app
        .client
        .register(register_request(&new_email(), "pass_word!"))
        .await
        .expect("Register failed")
        .into_inner()
        .user_id;

    let before = app
        .client
        .is_admin(IsAdminRequest { user_id })
        .await
        .expect("IsAdmin failed")
        .into_inner();
    assert!(!before.is_admin);

    app.make_admin(user_id).await;

    let after = app
        .client
        .is_admin(IsAdminRequest { user_id })
        .await
        .expect("IsAdmin failed")
        .into_inner();
    assert!(after.is_admin);
}

#[tokio::test]
async fn test_is_admin_unknown_user() {
    let mut app = TestApp::spawn().await;

    let status = app
        .client
        .is_admin(IsAdminRequest { user_id: 424242 })
        .await
        .expect_err("IsAdmin must fail");

    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(status.message(), "user not found");
}

#[tokio::test]
async fn test_is_admin_invalid_user_id() {
    let mut app = TestApp::spawn().await;

    for user_id in [0, -1] {
        let status = app
            .client
            .is_admin(IsAdminRequest { user_id })
            .await
            .expect_err("IsAdmin must fail");

        assert_eq!(status.code(), Code::InvalidArgument);
        assert_eq!(status.message(), "invalid user id");
    }
}

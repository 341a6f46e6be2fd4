//! Authentication service unit tests.

mod common;

use uuid::Uuid;

use bookclub::config::Config;
use bookclub::domain::Password;
use bookclub::errors::AppError;
use bookclub::services::{AuthService, Authenticator, Registration};

use common::{test_user, TestMocks};

fn test_config() -> Config {
    Config::with_secret("test-secret-key-for-testing-only-32chars")
}

fn registration() -> Registration {
    Registration {
        username: "reader".to_string(),
        email: "reader@example.com".to_string(),
        password: "secure_password_123".to_string(),
        bio: String::new(),
        avatar_url: None,
    }
}

#[tokio::test]
async fn register_creates_member_account() {
    let mut mocks = TestMocks::default();
    mocks
        .users
        .expect_find_by_username()
        .withf(|u| u == "reader")
        .returning(|_| Ok(None));
    mocks
        .users
        .expect_find_by_email()
        .withf(|e| e == "reader@example.com")
        .returning(|_| Ok(None));
    mocks
        .users
        .expect_create()
        .withf(|_, _, _, role, _, _| role == "member")
        .returning(|username, email, password_hash, _, bio, avatar_url| {
            let mut user = test_user(Uuid::new_v4());
            user.username = username;
            user.email = email;
            user.password_hash = password_hash;
            user.bio = bio;
            user.avatar_url = avatar_url;
            Ok(user)
        });

    let service = Authenticator::new(mocks.build(), test_config());
    let user = service.register(registration()).await.unwrap();

    assert_eq!(user.username, "reader");
    // The stored hash must verify against the submitted password
    let stored = Password::from_hash(user.password_hash);
    assert!(stored.verify("secure_password_123"));
}

#[tokio::test]
async fn register_rejects_taken_username() {
    let mut mocks = TestMocks::default();
    mocks
        .users
        .expect_find_by_username()
        .returning(|_| Ok(Some(test_user(Uuid::new_v4()))));

    let service = Authenticator::new(mocks.build(), test_config());
    let result = service.register(registration()).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn register_rejects_taken_email() {
    let mut mocks = TestMocks::default();
    mocks.users.expect_find_by_username().returning(|_| Ok(None));
    mocks
        .users
        .expect_find_by_email()
        .returning(|_| Ok(Some(test_user(Uuid::new_v4()))));

    let service = Authenticator::new(mocks.build(), test_config());
    let result = service.register(registration()).await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn login_returns_verifiable_token() {
    let user_id = Uuid::new_v4();
    let hash = Password::new("secure_password_123").unwrap().into_string();

    let mut mocks = TestMocks::default();
    mocks.users.expect_find_by_username().returning(move |_| {
        let mut user = test_user(user_id);
        user.password_hash = hash.clone();
        Ok(Some(user))
    });

    let service = Authenticator::new(mocks.build(), test_config());
    let token = service
        .login("reader".to_string(), "secure_password_123".to_string())
        .await
        .unwrap();

    assert_eq!(token.token_type, "Bearer");

    let claims = service.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.username, "reader");
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let hash = Password::new("secure_password_123").unwrap().into_string();

    let mut mocks = TestMocks::default();
    mocks.users.expect_find_by_username().returning(move |_| {
        let mut user = test_user(Uuid::new_v4());
        user.password_hash = hash.clone();
        Ok(Some(user))
    });

    let service = Authenticator::new(mocks.build(), test_config());
    let result = service
        .login("reader".to_string(), "wrong_password".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn login_rejects_unknown_username_with_same_error() {
    let mut mocks = TestMocks::default();
    mocks.users.expect_find_by_username().returning(|_| Ok(None));

    let service = Authenticator::new(mocks.build(), test_config());
    let result = service
        .login("nobody".to_string(), "secure_password_123".to_string())
        .await;

    // Unknown username is indistinguishable from a wrong password
    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn verify_rejects_tampered_token() {
    let mocks = TestMocks::default();
    let service = Authenticator::new(mocks.build(), test_config());

    let result = service.verify_token("not.a.token");
    assert!(result.is_err());
}

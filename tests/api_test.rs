//! API-layer tests.
//!
//! These tests use hand-rolled mock services to exercise API types and
//! auth plumbing without requiring database or Redis connections.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use uuid::Uuid;

use bookclub::api::middleware::{require_admin, CurrentUser};
use bookclub::domain::{Permission, User, UserRole};
use bookclub::errors::{AppError, AppResult};
use bookclub::services::{AuthService, Claims, Registration, TokenResponse};
use bookclub::types::{Created, MessageResponse, NoContent, Paginated, PaginationParams};

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Mock auth service that returns predefined responses
struct StubAuthService;

#[async_trait]
impl AuthService for StubAuthService {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        Ok(User {
            id: Uuid::new_v4(),
            username: registration.username,
            email: registration.email,
            password_hash: "hashed".to_string(),
            role: UserRole::Member,
            bio: registration.bio,
            avatar_url: registration.avatar_url,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn login(&self, _username: String, _password: String) -> AppResult<TokenResponse> {
        Ok(TokenResponse {
            access_token: "mock-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == "valid-test-token" {
            Ok(Claims {
                sub: Uuid::new_v4(),
                username: "reader".to_string(),
                role: "member".to_string(),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

// =============================================================================
// Error Mapping Tests
// =============================================================================

#[tokio::test]
async fn error_variants_map_to_expected_status_codes() {
    assert_eq!(
        AppError::NotFound.into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::Unauthorized.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::Forbidden.into_response().status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        AppError::conflict("Username").into_response().status(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        AppError::bad_request("You cannot follow yourself")
            .into_response()
            .status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn error_body_carries_code_and_message() {
    let response = AppError::conflict("Email").into_response();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"]["code"], "CONFLICT");
    assert_eq!(json["error"]["message"], "Email already exists");
}

// =============================================================================
// Response Type Tests
// =============================================================================

#[tokio::test]
async fn created_response_is_201_with_json_body() {
    let response = Created(MessageResponse::new("done")).into_response();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn no_content_response_is_204() {
    let response = NoContent.into_response();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn paginated_response_computes_total_pages() {
    let params = PaginationParams {
        page: 2,
        per_page: 10,
    };
    let paginated = Paginated::new(vec!["a", "b"], &params, 25);

    assert_eq!(paginated.meta.page, 2);
    assert_eq!(paginated.meta.per_page, 10);
    assert_eq!(paginated.meta.total, 25);
    assert_eq!(paginated.meta.total_pages, 3);
}

// =============================================================================
// Auth Plumbing Tests
// =============================================================================

#[tokio::test]
async fn current_user_admin_check() {
    let member = CurrentUser {
        id: Uuid::new_v4(),
        username: "reader".to_string(),
        role: UserRole::Member,
    };
    let admin = CurrentUser {
        id: Uuid::new_v4(),
        username: "librarian".to_string(),
        role: UserRole::Admin,
    };

    assert!(!member.is_admin());
    assert!(admin.is_admin());
    assert!(matches!(
        require_admin(&member).unwrap_err(),
        AppError::Forbidden
    ));
    assert!(require_admin(&admin).is_ok());
}

#[tokio::test]
async fn stub_auth_service_verifies_known_token_only() {
    let service = StubAuthService;

    let claims = service.verify_token("valid-test-token").unwrap();
    assert_eq!(claims.username, "reader");
    assert!(claims.exp > claims.iat);

    let result = service.verify_token("other-token");
    assert!(matches!(result.unwrap_err(), AppError::Unauthorized));
}

#[tokio::test]
async fn stub_auth_service_registers_members() {
    let service = StubAuthService;
    let user = service
        .register(Registration {
            username: "reader".to_string(),
            email: "reader@example.com".to_string(),
            password: "secure_password_123".to_string(),
            bio: String::new(),
            avatar_url: None,
        })
        .await
        .unwrap();

    assert_eq!(user.role, UserRole::Member);
    assert_eq!(user.username, "reader");
}

// =============================================================================
// Domain Model Tests
// =============================================================================

#[tokio::test]
async fn user_role_string_round_trip() {
    assert_eq!(UserRole::Member.to_string(), "member");
    assert_eq!(UserRole::Admin.to_string(), "admin");
    assert_eq!(UserRole::from("member"), UserRole::Member);
    assert_eq!(UserRole::from("admin"), UserRole::Admin);
    // Unknown values default to Member
    assert_eq!(UserRole::from("superuser"), UserRole::Member);
}

#[tokio::test]
async fn permission_codes_are_stable() {
    assert_eq!(Permission::CanView.code(), "can_view");
    assert_eq!(Permission::CanCreate.code(), "can_create");
    assert_eq!(Permission::CanEdit.code(), "can_edit");
    assert_eq!(Permission::CanDelete.code(), "can_delete");
}

#[tokio::test]
async fn user_serialization_skips_password_hash() {
    let user = User {
        id: Uuid::new_v4(),
        username: "reader".to_string(),
        email: "reader@example.com".to_string(),
        password_hash: "super-secret-hash".to_string(),
        role: UserRole::Member,
        bio: String::new(),
        avatar_url: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let json = serde_json::to_string(&user).unwrap();
    assert!(!json.contains("super-secret-hash"));
}

// =============================================================================
// Password Hashing Tests
// =============================================================================

#[tokio::test]
async fn password_hashing_round_trip() {
    use bookclub::domain::Password;

    let plain_password = "secure_password_123";
    let password = Password::new(plain_password).expect("Hashing should succeed");
    let hash = password.into_string();

    assert_ne!(hash.as_str(), plain_password);

    let stored = Password::from_hash(hash);
    assert!(stored.verify(plain_password));
    assert!(!stored.verify("wrong_password"));
}

#[tokio::test]
async fn same_password_hashes_differently() {
    use bookclub::domain::Password;

    let plain_password = "same_password";
    let hash1 = Password::new(plain_password).unwrap().into_string();
    let hash2 = Password::new(plain_password).unwrap().into_string();

    // Salted hashes must differ
    assert_ne!(hash1.as_str(), hash2.as_str());
    assert!(Password::from_hash(hash1).verify(plain_password));
    assert!(Password::from_hash(hash2).verify(plain_password));
}

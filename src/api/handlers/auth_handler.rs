//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::{Registration, TokenResponse};

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Username (3-30 characters)
    #[validate(length(min = 3, max = 30, message = "Username must be 3-30 characters"))]
    #[schema(example = "bookworm42", min_length = 3, max_length = 30)]
    pub username: String,
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// Short biography (up to 100 characters)
    #[validate(length(max = 100, message = "Bio must be at most 100 characters"))]
    #[schema(example = "Reads mostly sci-fi.")]
    #[serde(default)]
    pub bio: String,
    /// Avatar image URL
    #[validate(url(message = "Invalid avatar URL"))]
    #[schema(example = "https://example.com/avatar.png")]
    pub avatar_url: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "bookworm42")]
    pub username: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new member account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered successfully", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .auth_service
        .register(Registration {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            bio: payload.bio,
            avatar_url: payload.avatar_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .auth_service
        .login(payload.username, payload.password)
        .await?;

    Ok(Json(token))
}

//! Authentication service - registration, login, token verification.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, ROLE_MEMBER, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::Repositories;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Fields accepted at registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub bio: String,
    pub avatar_url: Option<String>,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new member account
    async fn register(&self, registration: Registration) -> AppResult<User>;

    /// Login with username and password, returning a JWT token
    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Generate JWT token for a user (shared helper)
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService.
pub struct Authenticator<R: Repositories> {
    repos: Arc<R>,
    config: Config,
}

impl<R: Repositories> Authenticator<R> {
    /// Create new auth service instance
    pub fn new(repos: Arc<R>, config: Config) -> Self {
        Self { repos, config }
    }
}

#[async_trait]
impl<R: Repositories> AuthService for Authenticator<R> {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        // Field formats are validated by the handler's ValidatedJson extractor
        if self
            .repos
            .users()
            .find_by_username(&registration.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Username"));
        }
        if self
            .repos
            .users()
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Email"));
        }

        let password_hash = Password::new(&registration.password)?.into_string();
        self.repos
            .users()
            .create(
                registration.username,
                registration.email,
                password_hash,
                ROLE_MEMBER.to_string(),
                registration.bio,
                registration.avatar_url,
            )
            .await
    }

    async fn login(&self, username: String, password: String) -> AppResult<TokenResponse> {
        let user_result = self.repos.users().find_by_username(&username).await?;

        // SECURITY: Perform password verification even if the user doesn't
        // exist, so the response time does not reveal valid usernames.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        // Only succeed if both user exists AND password is valid
        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified user_exists is true
        generate_token(user_result.as_ref().unwrap(), &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

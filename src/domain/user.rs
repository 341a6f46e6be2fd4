//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_MEMBER};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Member,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges.
    ///
    /// Admins bypass every catalog permission check (superuser semantics).
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::Member,
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.to_string()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Member => write!(f, "{}", ROLE_MEMBER),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// A user together with their follow counts
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub followers: u64,
    pub following: u64,
}

/// User response (safe to return to client; used for registration and admin lists)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Username
    #[schema(example = "bookworm42")]
    pub username: String,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User role
    #[schema(example = "member")]
    pub role: String,
    /// Short biography
    #[schema(example = "Reads mostly sci-fi.")]
    pub bio: String,
    /// Avatar image URL
    #[schema(example = "https://example.com/avatar.png")]
    pub avatar_url: Option<String>,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            bio: user.bio,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}

/// Public profile of a user (no email), with follow counts
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    #[schema(example = "bookworm42")]
    pub username: String,
    #[schema(example = "Reads mostly sci-fi.")]
    pub bio: String,
    pub avatar_url: Option<String>,
    /// Number of users following this user
    pub followers: u64,
    /// Number of users this user follows
    pub following: u64,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.user.id,
            username: profile.user.username,
            bio: profile.user.bio,
            avatar_url: profile.user.avatar_url,
            followers: profile.followers,
            following: profile.following,
            created_at: profile.user.created_at,
        }
    }
}

/// The caller's own profile: everything the public profile has plus
/// email and role.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OwnProfileResponse {
    pub id: Uuid,
    #[schema(example = "bookworm42")]
    pub username: String,
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "member")]
    pub role: String,
    pub bio: String,
    pub avatar_url: Option<String>,
    pub followers: u64,
    pub following: u64,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for OwnProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.user.id,
            username: profile.user.username,
            email: profile.user.email,
            role: profile.user.role.to_string(),
            bio: profile.user.bio,
            avatar_url: profile.user.avatar_url,
            followers: profile.followers,
            following: profile.following,
            created_at: profile.user.created_at,
        }
    }
}

//! User service - profiles, follows, admin account management.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, VERB_STARTED_FOLLOWING};
use crate::domain::{Password, Profile, User};
use crate::errors::{AppError, AppResult};
use crate::infra::Repositories;
use crate::types::PaginationParams;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Get user with follower/following counts
    async fn profile(&self, id: Uuid) -> AppResult<Profile>;

    /// Update own profile fields; a taken email is a conflict
    async fn update_profile(
        &self,
        id: Uuid,
        email: Option<String>,
        bio: Option<String>,
        avatar_url: Option<String>,
    ) -> AppResult<User>;

    /// List users, paginated (admin surface)
    async fn list_users(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)>;

    /// Delete a user account; callers cannot delete themselves
    async fn delete_user(&self, caller_id: Uuid, id: Uuid) -> AppResult<()>;

    /// Start following a user. Idempotent; a new follow notifies the
    /// followed user.
    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> AppResult<()>;

    /// Stop following a user; idempotent
    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> AppResult<()>;

    /// Users following the given user
    async fn followers(&self, id: Uuid) -> AppResult<Vec<User>>;

    /// Users the given user follows
    async fn following(&self, id: Uuid) -> AppResult<Vec<User>>;

    /// Create an admin account (CLI seed)
    async fn create_admin(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager<R: Repositories> {
    repos: Arc<R>,
}

impl<R: Repositories> UserManager<R> {
    /// Create new user service instance
    pub fn new(repos: Arc<R>) -> Self {
        Self { repos }
    }
}

#[async_trait]
impl<R: Repositories> UserService for UserManager<R> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn profile(&self, id: Uuid) -> AppResult<Profile> {
        let user = self.get_user(id).await?;
        let followers = self.repos.follows().count_followers(id).await?;
        let following = self.repos.follows().count_following(id).await?;

        Ok(Profile {
            user,
            followers,
            following,
        })
    }

    async fn update_profile(
        &self,
        id: Uuid,
        email: Option<String>,
        bio: Option<String>,
        avatar_url: Option<String>,
    ) -> AppResult<User> {
        if let Some(new_email) = &email {
            if let Some(other) = self.repos.users().find_by_email(new_email).await? {
                if other.id != id {
                    return Err(AppError::conflict("Email"));
                }
            }
        }

        self.repos
            .users()
            .update_profile(id, email, bio, avatar_url)
            .await
    }

    async fn list_users(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)> {
        self.repos.users().list(params).await
    }

    async fn delete_user(&self, caller_id: Uuid, id: Uuid) -> AppResult<()> {
        if caller_id == id {
            return Err(AppError::bad_request("You cannot delete your own account"));
        }

        self.repos.users().delete(id).await
    }

    async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> AppResult<()> {
        if follower_id == followed_id {
            return Err(AppError::bad_request("You cannot follow yourself"));
        }

        // Target must exist
        self.repos
            .users()
            .find_by_id(followed_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if self.repos.follows().exists(follower_id, followed_id).await? {
            // Already following: no-op, no duplicate notification
            return Ok(());
        }

        self.repos.follows().insert(follower_id, followed_id).await?;

        // Sequential writes: the follow stands even if the notification
        // insert fails.
        self.repos
            .notifications()
            .insert(followed_id, follower_id, VERB_STARTED_FOLLOWING.to_string())
            .await?;

        Ok(())
    }

    async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> AppResult<()> {
        self.repos
            .users()
            .find_by_id(followed_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.repos.follows().delete(follower_id, followed_id).await
    }

    async fn followers(&self, id: Uuid) -> AppResult<Vec<User>> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let ids = self.repos.follows().follower_ids(id).await?;
        self.repos.users().find_many(ids).await
    }

    async fn following(&self, id: Uuid) -> AppResult<Vec<User>> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let ids = self.repos.follows().followed_ids(id).await?;
        self.repos.users().find_many(ids).await
    }

    async fn create_admin(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<User> {
        if self.repos.users().find_by_username(&username).await?.is_some() {
            return Err(AppError::conflict("Username"));
        }
        if self.repos.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.repos
            .users()
            .create(
                username,
                email,
                password_hash,
                ROLE_ADMIN.to_string(),
                String::new(),
                None,
            )
            .await
    }
}

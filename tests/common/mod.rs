//! Shared test fixtures: mock repositories behind the provider trait.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use bookclub::domain::{Book, Notification, Post, User, UserRole};
use bookclub::infra::repositories::{
    AccessRepository, BookRepository, FollowRepository, MockAccessRepository, MockBookRepository,
    MockFollowRepository, MockNotificationRepository, MockPostRepository, MockUserRepository,
    NotificationRepository, PostRepository, UserRepository,
};
use bookclub::infra::Repositories;

/// Mock repository set. Configure expectations on the fields, then
/// `build()` into the provider the services expect.
#[derive(Default)]
pub struct TestMocks {
    pub users: MockUserRepository,
    pub follows: MockFollowRepository,
    pub posts: MockPostRepository,
    pub books: MockBookRepository,
    pub notifications: MockNotificationRepository,
    pub access: MockAccessRepository,
}

impl TestMocks {
    pub fn build(self) -> Arc<TestRepositories> {
        Arc::new(TestRepositories {
            users: Arc::new(self.users),
            follows: Arc::new(self.follows),
            posts: Arc::new(self.posts),
            books: Arc::new(self.books),
            notifications: Arc::new(self.notifications),
            access: Arc::new(self.access),
        })
    }
}

/// Repositories implementation backed entirely by mocks
pub struct TestRepositories {
    users: Arc<MockUserRepository>,
    follows: Arc<MockFollowRepository>,
    posts: Arc<MockPostRepository>,
    books: Arc<MockBookRepository>,
    notifications: Arc<MockNotificationRepository>,
    access: Arc<MockAccessRepository>,
}

impl Repositories for TestRepositories {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn follows(&self) -> Arc<dyn FollowRepository> {
        self.follows.clone()
    }

    fn posts(&self) -> Arc<dyn PostRepository> {
        self.posts.clone()
    }

    fn books(&self) -> Arc<dyn BookRepository> {
        self.books.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notifications.clone()
    }

    fn access(&self) -> Arc<dyn AccessRepository> {
        self.access.clone()
    }
}

pub fn test_user(id: Uuid) -> User {
    User {
        id,
        username: "reader".to_string(),
        email: "reader@example.com".to_string(),
        password_hash: "hashed".to_string(),
        role: UserRole::Member,
        bio: "Reads mostly sci-fi.".to_string(),
        avatar_url: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_admin(id: Uuid) -> User {
    User {
        role: UserRole::Admin,
        username: "librarian".to_string(),
        email: "librarian@example.com".to_string(),
        ..test_user(id)
    }
}

pub fn test_post(id: Uuid, author_id: Uuid) -> Post {
    Post {
        id,
        author_id,
        title: "Thoughts on chapter three".to_string(),
        content: "Spoilers ahead.".to_string(),
        published_at: Utc::now(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_book(id: Uuid, added_by: Uuid) -> Book {
    Book {
        id,
        title: "The Dispossessed".to_string(),
        author: "Ursula K. Le Guin".to_string(),
        publication_year: 1974,
        added_by: Some(added_by),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_notification(id: Uuid, recipient_id: Uuid, actor_id: Uuid) -> Notification {
    Notification {
        id,
        recipient_id,
        actor_id,
        verb: "started following you".to_string(),
        read: false,
        created_at: Utc::now(),
    }
}

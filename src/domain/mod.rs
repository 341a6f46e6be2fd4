//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod access;
pub mod book;
pub mod notification;
pub mod password;
pub mod post;
pub mod user;

pub use access::{Group, GroupSummary, Permission};
pub use book::{Book, BookResponse};
pub use notification::{Notification, NotificationResponse};
pub use password::Password;
pub use post::{Post, PostResponse};
pub use user::{OwnProfileResponse, Profile, ProfileResponse, User, UserResponse, UserRole};

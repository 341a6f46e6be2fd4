//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod book;
pub mod follow;
pub mod group;
pub mod group_permission;
pub mod notification;
pub mod permission;
pub mod post;
pub mod user;
pub mod user_group;

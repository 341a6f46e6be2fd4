//! HTTP request handlers.

pub mod auth_handler;
pub mod book_handler;
pub mod group_handler;
pub mod notification_handler;
pub mod post_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use book_handler::book_routes;
pub use group_handler::group_routes;
pub use notification_handler::notification_routes;
pub use post_handler::post_routes;
pub use user_handler::user_routes;

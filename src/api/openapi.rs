//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, book_handler, group_handler, notification_handler, post_handler, user_handler,
};
use crate::domain::{
    BookResponse, GroupSummary, NotificationResponse, OwnProfileResponse, Permission, PostResponse,
    ProfileResponse, UserResponse, UserRole,
};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the Bookclub API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookclub API",
        version = "0.1.0",
        description = "A community API for readers: accounts and follows, blog posts, a permission-gated book catalog and notifications",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
        (url = "https://api.example.com", description = "Production server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // User endpoints
        user_handler::get_own_profile,
        user_handler::update_own_profile,
        user_handler::get_user_profile,
        user_handler::list_users,
        user_handler::delete_user,
        user_handler::follow_user,
        user_handler::unfollow_user,
        user_handler::list_followers,
        user_handler::list_following,
        // Post endpoints
        post_handler::list_posts,
        post_handler::feed,
        post_handler::get_post,
        post_handler::create_post,
        post_handler::update_post,
        post_handler::delete_post,
        // Book endpoints
        book_handler::list_books,
        book_handler::get_book,
        book_handler::create_book,
        book_handler::update_book,
        book_handler::delete_book,
        // Notification endpoints
        notification_handler::list_notifications,
        notification_handler::mark_read,
        notification_handler::mark_all_read,
        notification_handler::unread_count,
        // Group endpoints
        group_handler::list_groups,
        group_handler::add_member,
        group_handler::remove_member,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            Permission,
            UserResponse,
            ProfileResponse,
            OwnProfileResponse,
            PostResponse,
            BookResponse,
            NotificationResponse,
            GroupSummary,
            MessageResponse,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // Request types
            user_handler::UpdateProfileRequest,
            user_handler::UserSummary,
            post_handler::CreatePostRequest,
            post_handler::UpdatePostRequest,
            book_handler::CreateBookRequest,
            book_handler::UpdateBookRequest,
            notification_handler::MarkAllReadResponse,
            notification_handler::UnreadCountResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Account registration and login"),
        (name = "Users", description = "Profiles and follows"),
        (name = "Posts", description = "Blog posts and the follow feed"),
        (name = "Books", description = "Permission-gated book catalog"),
        (name = "Notifications", description = "Per-user notification inbox"),
        (name = "Groups", description = "Group membership administration")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

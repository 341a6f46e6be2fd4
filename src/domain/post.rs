//! Blog post domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Blog post domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    /// Publication timestamp, set at create time; lists order by it descending
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    #[schema(example = "Thoughts on chapter three")]
    pub title: String,
    pub content: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            title: post.title,
            content: post.content,
            published_at: post.published_at,
            updated_at: post.updated_at,
        }
    }
}

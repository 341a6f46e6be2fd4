//! Book catalog domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Catalog book domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    /// Book author name, free text (not a user reference)
    pub author: String,
    pub publication_year: i32,
    /// User who added the entry; cleared when that account is deleted
    pub added_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookResponse {
    pub id: Uuid,
    #[schema(example = "The Dispossessed")]
    pub title: String,
    #[schema(example = "Ursula K. Le Guin")]
    pub author: String,
    #[schema(example = 1974)]
    pub publication_year: i32,
    pub added_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            publication_year: book.publication_year,
            added_by: book.added_by,
            created_at: book.created_at,
        }
    }
}

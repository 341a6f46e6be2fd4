//! Book catalog handlers.
//!
//! Every route is permission-gated: the handler asks the access service
//! for the required catalog permission before touching the service.
//! Admin-role users pass every check.

use axum::{
    extract::{Extension, Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{BookResponse, Permission};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Book creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookRequest {
    /// Book title (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    #[schema(example = "The Dispossessed", max_length = 100)]
    pub title: String,
    /// Author name (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    #[schema(example = "Ursula K. Le Guin", max_length = 100)]
    pub author: String,
    /// Publication year
    #[validate(range(min = 0, max = 2100, message = "Publication year must be 0-2100"))]
    #[schema(example = 1974)]
    pub publication_year: i32,
}

/// Book update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookRequest {
    /// New title (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,
    /// New author name (1-100 characters)
    #[validate(length(min = 1, max = 100, message = "Author must be 1-100 characters"))]
    pub author: Option<String>,
    /// New publication year
    #[validate(range(min = 0, max = 2100, message = "Publication year must be 0-2100"))]
    pub publication_year: Option<i32>,
}

/// Create book catalog routes (all require authentication)
pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/:id",
            get(get_book).put(update_book).delete(delete_book),
        )
}

/// List catalog books ordered by title
#[utoipa::path(
    get,
    path = "/books",
    tag = "Books",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-indexed)"),
        ("per_page" = Option<u64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Paginated book list"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Requires can_view permission")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Paginated<BookResponse>>> {
    state
        .access_service
        .require(user.id, user.role, Permission::CanView)
        .await?;

    let (books, total) = state.book_service.list_books(params.clone()).await?;
    let paginated = Paginated::new(books, &params, total).map(BookResponse::from);

    Ok(Json(paginated))
}

/// Get a catalog book
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "Books",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book detail", body = BookResponse),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Requires can_view permission"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookResponse>> {
    state
        .access_service
        .require(user.id, user.role, Permission::CanView)
        .await?;

    let book = state.book_service.get_book(id).await?;
    Ok(Json(BookResponse::from(book)))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/books",
    tag = "Books",
    security(("bearer_auth" = [])),
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book added", body = BookResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Requires can_create permission")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateBookRequest>,
) -> AppResult<Created<BookResponse>> {
    state
        .access_service
        .require(user.id, user.role, Permission::CanCreate)
        .await?;

    let book = state
        .book_service
        .create_book(
            payload.title,
            payload.author,
            payload.publication_year,
            user.id,
        )
        .await?;

    Ok(Created(BookResponse::from(book)))
}

/// Update a catalog book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "Books",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Book ID")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Requires can_edit permission"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBookRequest>,
) -> AppResult<Json<BookResponse>> {
    state
        .access_service
        .require(user.id, user.role, Permission::CanEdit)
        .await?;

    let book = state
        .book_service
        .update_book(id, payload.title, payload.author, payload.publication_year)
        .await?;

    Ok(Json(BookResponse::from(book)))
}

/// Remove a book from the catalog
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "Books",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book removed"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Requires can_delete permission"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<NoContent> {
    state
        .access_service
        .require(user.id, user.role, Permission::CanDelete)
        .await?;

    state.book_service.delete_book(id).await?;
    Ok(NoContent)
}

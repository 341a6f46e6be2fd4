//! Shared types used across layers.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use response::{Created, MessageResponse, NoContent};

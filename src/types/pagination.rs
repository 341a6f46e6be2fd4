//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination query parameters, reusable across all list endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.limit()
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.per_page.min(MAX_PAGE_SIZE).max(1)
    }

    /// Zero-indexed page number for SeaORM paginators
    pub fn zero_indexed_page(&self) -> u64 {
        self.page.saturating_sub(1)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper, reusable for all list responses
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    /// Create new paginated response
    pub fn new(data: Vec<T>, params: &PaginationParams, total: u64) -> Self {
        let per_page = params.limit();
        let total_pages = if per_page > 0 {
            total.div_ceil(per_page)
        } else {
            0
        };

        Self {
            data,
            meta: PaginationMeta {
                page: params.page,
                per_page,
                total,
                total_pages,
            },
        }
    }

    /// Map the items while preserving the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_page_is_capped() {
        let params = PaginationParams {
            page: 1,
            per_page: 5000,
        };
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn offset_is_zero_for_first_page() {
        let params = PaginationParams {
            page: 1,
            per_page: 20,
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.zero_indexed_page(), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        let params = PaginationParams {
            page: 1,
            per_page: 20,
        };
        let paginated = Paginated::new(vec![1, 2, 3], &params, 41);
        assert_eq!(paginated.meta.total_pages, 3);
    }
}

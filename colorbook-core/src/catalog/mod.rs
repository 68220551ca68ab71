//! Per-entity catalog services.
//!
//! Each service wraps the store with the shared CRUD validation rules:
//! trimmed non-empty required fields, case-insensitive uniqueness with
//! self-exclusion on update, creation defaults, timestamp stamping, and the
//! dependent-count delete guard where it applies. Validation runs inside the
//! collection's write lock so a check-then-insert cannot race.

pub mod categories;
pub mod keywords;
pub mod pages;
pub mod theme_parks;

pub use categories::{CategoryService, CreateCategoryRequest, UpdateCategoryRequest};
pub use keywords::{CreateKeywordRequest, KeywordService, UpdateKeywordRequest};
pub use pages::{CreatePageRequest, PageService, UpdatePageRequest};
pub use theme_parks::{CreateThemeParkRequest, ThemeParkService, UpdateThemeParkRequest};

use crate::error::{CatalogError, CatalogResult};

/// Trim a required string field, rejecting empty and whitespace-only values.
pub(crate) fn require_field(field: &str, value: &str) -> CatalogResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Uniqueness comparison: both sides trimmed, then compared lower-cased.
pub(crate) fn is_duplicate(existing: &str, candidate: &str) -> bool {
    existing.trim().to_lowercase() == candidate.trim().to_lowercase()
}

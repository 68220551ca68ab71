use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Smallest accepted page size.
pub const MIN_LIMIT: usize = 1;
/// Largest accepted page size.
pub const MAX_LIMIT: usize = 50;

/// Sort key for catalog listings. Unrecognized request values fall back to
/// [`SortBy::Newest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    Title,
    Difficulty,
}

impl SortBy {
    /// Parse a query-string value, falling back to `Newest` for anything
    /// unrecognized (including the absent case).
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("oldest") => SortBy::Oldest,
            Some("title") => SortBy::Title,
            Some("difficulty") => SortBy::Difficulty,
            _ => SortBy::Newest,
        }
    }
}

/// Visibility filter. An empty request value means "no filter".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("active") => StatusFilter::Active,
            Some("inactive") => StatusFilter::Inactive,
            _ => StatusFilter::Any,
        }
    }

    /// Whether an item with the given active flag survives this filter.
    pub fn accepts(self, is_active: bool) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Active => is_active,
            StatusFilter::Inactive => !is_active,
        }
    }
}

/// One search request: free text, grouping tag, visibility, sort, and page
/// window. Built by the transport layer from query-string parameters and
/// validated there before the engine runs.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    /// Free-text term; empty or whitespace-only matches everything.
    pub term: String,
    /// Grouping tag; empty or the sentinel `"all"` matches everything,
    /// anything else must equal the stored tag exactly.
    pub tag: String,
    pub status: StatusFilter,
    pub sort: SortBy,
    pub page: usize,
    pub limit: usize,
}

impl QuerySpec {
    /// A spec that matches everything, sorted newest-first, first page.
    pub fn all(limit: usize) -> Self {
        Self {
            term: String::new(),
            tag: String::new(),
            status: StatusFilter::Any,
            sort: SortBy::Newest,
            page: 1,
            limit,
        }
    }

    /// Bounds validation per the listing contract: `page >= 1` and
    /// `1 <= limit <= 50`. Out-of-range values are rejected before any
    /// data is touched.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.page < 1 {
            return Err(CatalogError::validation("page must be at least 1"));
        }
        if self.limit < MIN_LIMIT || self.limit > MAX_LIMIT {
            return Err(CatalogError::validation(format!(
                "limit must be between {MIN_LIMIT} and {MAX_LIMIT}"
            )));
        }
        Ok(())
    }

    /// True when the tag filter is a no-op (empty or the `"all"` sentinel).
    pub fn tag_is_wildcard(&self) -> bool {
        self.tag.is_empty() || self.tag.eq_ignore_ascii_case("all")
    }
}

//! Route handlers. Each submodule covers one entity's public and admin
//! surface; shared query-string parsing lives here.

pub mod categories;
pub mod keywords;
pub mod pages;
pub mod proxy;
pub mod theme_parks;

use serde::Deserialize;

use colorbook_core::query::{QuerySpec, SortBy, StatusFilter};

use crate::errors::AppResult;

/// Default page size for public listings.
pub const PUBLIC_LIST_LIMIT: usize = 24;
/// Default page size for public theme-park page searches.
pub const PARK_LIST_LIMIT: usize = 20;
/// Default page size for admin listings.
pub const ADMIN_LIST_LIMIT: usize = 10;

/// Query-string parameters shared by every listing endpoint. Endpoints pick
/// the grouping dimension (`category` or `theme`) that applies to them.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub theme: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl ListParams {
    /// True when no search parameter was supplied at all, which switches the
    /// theme-parks endpoint into its bare-listing mode.
    pub fn is_bare(&self) -> bool {
        self.q.is_none()
            && self.theme.is_none()
            && self.status.is_none()
            && self.sort.is_none()
            && self.page.is_none()
            && self.limit.is_none()
    }
}

/// Build and bounds-check a [`QuerySpec`] from request parameters. Runs
/// before any store access so invalid requests reject without touching data.
pub(crate) fn build_spec(
    params: &ListParams,
    tag: Option<&str>,
    default_limit: usize,
) -> AppResult<QuerySpec> {
    let spec = QuerySpec {
        term: params.q.clone().unwrap_or_default(),
        tag: tag.unwrap_or_default().to_string(),
        status: StatusFilter::from_param(params.status.as_deref()),
        sort: SortBy::from_param(params.sort.as_deref()),
        page: params.page.unwrap_or(1),
        limit: params.limit.unwrap_or(default_limit),
    };
    spec.validate()?;
    Ok(spec)
}

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use colorbook_model::{ItemId, Keyword};

use super::categories::next_sort_order;
use super::{is_duplicate, require_field};
use crate::api_types::Paginated;
use crate::error::{CatalogError, CatalogResult};
use crate::query::{run_query, QuerySpec};
use crate::store::CatalogStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateKeywordRequest {
    pub keyword: String,
    #[serde(default)]
    pub display_order: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Partial update: absent fields keep their current value. The date window
/// accepts explicit nulls to clear a bound, hence the double Option.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKeywordRequest {
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub display_order: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, with = "serde_double_option")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "serde_double_option")]
    pub end_date: Option<Option<NaiveDate>>,
}

/// Distinguishes "field absent" (keep) from "field null" (clear).
mod serde_double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[derive(Debug, Clone)]
pub struct KeywordService {
    store: Arc<CatalogStore>,
}

impl KeywordService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Currently-active keywords (flag set, today inside the date window),
    /// display order ascending. This is the public home-page listing.
    pub fn list_currently_active(&self) -> Vec<Keyword> {
        let today = Utc::now().date_naive();
        let mut rows: Vec<Keyword> = self.store.keywords.read(|rows| {
            rows.iter()
                .filter(|k| k.is_currently_active(today))
                .cloned()
                .collect()
        });
        rows.sort_by_key(|k| k.display_order);
        rows
    }

    pub fn search(&self, spec: &QuerySpec) -> Paginated<Keyword> {
        run_query(&self.store.keywords.snapshot(), spec)
    }

    pub fn get(&self, id: ItemId) -> CatalogResult<Keyword> {
        self.store
            .keywords
            .find_by_id(id)
            .ok_or_else(|| CatalogError::not_found("Keyword not found"))
    }

    /// Increment the click counter of the first currently-active keyword
    /// matching `raw` case-insensitively. A miss is a silent no-op; the
    /// public endpoint reports success either way.
    pub fn record_click(&self, raw: &str) -> bool {
        let needle = raw.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        let today = Utc::now().date_naive();
        self.store.keywords.write(|rows| {
            match rows
                .iter_mut()
                .find(|k| k.is_currently_active(today) && k.keyword.trim().to_lowercase() == needle)
            {
                Some(row) => {
                    row.click_count += 1;
                    row.updated_at = Utc::now();
                    true
                }
                None => false,
            }
        })
    }

    pub fn create(&self, req: CreateKeywordRequest) -> CatalogResult<Keyword> {
        let keyword = require_field("keyword", &req.keyword)?;
        validate_window(req.start_date, req.end_date)?;

        self.store.keywords.write(|rows| {
            if rows.iter().any(|k| is_duplicate(&k.keyword, &keyword)) {
                return Err(CatalogError::conflict("This keyword already exists"));
            }

            let now = Utc::now();
            let record = Keyword {
                id: self.store.keywords.allocate_id(),
                keyword,
                click_count: 0,
                display_order: req.display_order.unwrap_or_else(|| next_sort_order(rows)),
                is_active: req.is_active.unwrap_or(true),
                start_date: req.start_date,
                end_date: req.end_date,
                created_at: now,
                updated_at: now,
            };
            rows.push(record.clone());
            Ok(record)
        })
    }

    pub fn update(&self, id: ItemId, req: UpdateKeywordRequest) -> CatalogResult<Keyword> {
        self.store.keywords.write(|rows| {
            let current = rows
                .iter()
                .find(|k| k.id == id)
                .ok_or_else(|| CatalogError::not_found("Keyword not found"))?;

            let keyword = req
                .keyword
                .as_deref()
                .map(|raw| require_field("keyword", raw))
                .transpose()?;
            let start = req.start_date.unwrap_or(current.start_date);
            let end = req.end_date.unwrap_or(current.end_date);
            validate_window(start, end)?;

            if let Some(keyword) = &keyword {
                if rows
                    .iter()
                    .any(|k| k.id != id && is_duplicate(&k.keyword, keyword))
                {
                    return Err(CatalogError::conflict("This keyword already exists"));
                }
            }

            let row = rows
                .iter_mut()
                .find(|k| k.id == id)
                .ok_or_else(|| CatalogError::not_found("Keyword not found"))?;
            if let Some(keyword) = keyword {
                row.keyword = keyword;
            }
            if let Some(display_order) = req.display_order {
                row.display_order = display_order;
            }
            if let Some(is_active) = req.is_active {
                row.is_active = is_active;
            }
            if let Some(start_date) = req.start_date {
                row.start_date = start_date;
            }
            if let Some(end_date) = req.end_date {
                row.end_date = end_date;
            }
            row.updated_at = Utc::now();
            Ok(row.clone())
        })
    }

    pub fn delete(&self, id: ItemId) -> CatalogResult<Keyword> {
        self.store.keywords.write(|rows| {
            let index = rows
                .iter()
                .position(|k| k.id == id)
                .ok_or_else(|| CatalogError::not_found("Keyword not found"))?;
            Ok(rows.remove(index))
        })
    }
}

fn validate_window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> CatalogResult<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(CatalogError::validation(
                "startDate must not be after endDate",
            ));
        }
    }
    Ok(())
}

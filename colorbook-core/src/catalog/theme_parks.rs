use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use colorbook_model::{ColoringPage, ItemId, ThemePark};

use super::categories::next_sort_order;
use super::{is_duplicate, require_field};
use crate::api_types::Paginated;
use crate::error::{CatalogError, CatalogResult};
use crate::query::{run_query, run_query_by_tag, QuerySpec};
use crate::store::CatalogStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThemeParkRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<u32>,
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateThemeParkRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ThemeParkService {
    store: Arc<CatalogStore>,
}

impl ThemeParkService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Active parks in manual display order, for the bare public listing.
    pub fn list_active(&self) -> Vec<ThemePark> {
        let mut rows: Vec<ThemePark> = self
            .store
            .parks
            .read(|rows| rows.iter().filter(|p| p.is_active).cloned().collect());
        rows.sort_by_key(|p| p.sort_order);
        rows
    }

    /// Admin search over the parks themselves.
    pub fn search(&self, spec: &QuerySpec) -> Paginated<ThemePark> {
        run_query(&self.store.parks.snapshot(), spec)
    }

    /// Public search over park-associated coloring pages, grouped by the
    /// park's slug (the endpoint's `theme` parameter).
    pub fn search_pages(&self, spec: &QuerySpec) -> Paginated<ColoringPage> {
        let pages: Vec<ColoringPage> = self
            .store
            .pages
            .read(|rows| rows.iter().filter(|p| p.park_slug.is_some()).cloned().collect());
        run_query_by_tag(&pages, spec, |page| page.park_slug.as_deref())
    }

    pub fn get(&self, id: ItemId) -> CatalogResult<ThemePark> {
        self.store
            .parks
            .find_by_id(id)
            .ok_or_else(|| CatalogError::not_found("Theme park not found"))
    }

    pub fn create(&self, req: CreateThemeParkRequest) -> CatalogResult<ThemePark> {
        let name = require_field("name", &req.name)?;
        let slug = require_field("slug", &req.slug)?;

        self.store.parks.write(|rows| {
            if rows.iter().any(|p| is_duplicate(&p.name, &name)) {
                return Err(CatalogError::conflict(
                    "A theme park with this name already exists",
                ));
            }
            if rows.iter().any(|p| is_duplicate(&p.slug, &slug)) {
                return Err(CatalogError::conflict(
                    "A theme park with this slug already exists",
                ));
            }

            let now = Utc::now();
            let park = ThemePark {
                id: self.store.parks.allocate_id(),
                name,
                slug,
                description: req.description.unwrap_or_default(),
                page_count: 0,
                is_active: req.is_active.unwrap_or(true),
                sort_order: req.sort_order.unwrap_or_else(|| next_sort_order(rows)),
                created_at: now,
                updated_at: now,
            };
            rows.push(park.clone());
            Ok(park)
        })
    }

    pub fn update(&self, id: ItemId, req: UpdateThemeParkRequest) -> CatalogResult<ThemePark> {
        self.store.parks.write(|rows| {
            if !rows.iter().any(|p| p.id == id) {
                return Err(CatalogError::not_found("Theme park not found"));
            }

            let name = req
                .name
                .as_deref()
                .map(|raw| require_field("name", raw))
                .transpose()?;
            let slug = req
                .slug
                .as_deref()
                .map(|raw| require_field("slug", raw))
                .transpose()?;

            if let Some(name) = &name {
                if rows.iter().any(|p| p.id != id && is_duplicate(&p.name, name)) {
                    return Err(CatalogError::conflict(
                        "A theme park with this name already exists",
                    ));
                }
            }
            if let Some(slug) = &slug {
                if rows.iter().any(|p| p.id != id && is_duplicate(&p.slug, slug)) {
                    return Err(CatalogError::conflict(
                        "A theme park with this slug already exists",
                    ));
                }
            }

            let row = rows
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| CatalogError::not_found("Theme park not found"))?;
            if let Some(name) = name {
                row.name = name;
            }
            if let Some(slug) = slug {
                row.slug = slug;
            }
            if let Some(description) = req.description {
                row.description = description;
            }
            if let Some(is_active) = req.is_active {
                row.is_active = is_active;
            }
            if let Some(sort_order) = req.sort_order {
                row.sort_order = sort_order;
            }
            row.updated_at = Utc::now();
            Ok(row.clone())
        })
    }

    /// Delete a park. Rejected while coloring pages still reference it.
    pub fn delete(&self, id: ItemId) -> CatalogResult<ThemePark> {
        self.store.parks.write(|rows| {
            let index = rows
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| CatalogError::not_found("Theme park not found"))?;
            if rows[index].page_count > 0 {
                return Err(CatalogError::conflict(
                    "Cannot delete a theme park that still has pages",
                ));
            }
            Ok(rows.remove(index))
        })
    }
}

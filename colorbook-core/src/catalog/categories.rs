use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use colorbook_model::{Category, ItemId};

use super::{is_duplicate, require_field};
use crate::api_types::Paginated;
use crate::error::{CatalogError, CatalogResult};
use crate::query::{run_query, QuerySpec};
use crate::store::CatalogStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<u32>,
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct CategoryService {
    store: Arc<CatalogStore>,
}

impl CategoryService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Active categories in manual display order, for the public listing.
    pub fn list_active(&self) -> Vec<Category> {
        let mut rows: Vec<Category> = self
            .store
            .categories
            .read(|rows| rows.iter().filter(|c| c.is_active).cloned().collect());
        rows.sort_by_key(|c| c.sort_order);
        rows
    }

    pub fn search(&self, spec: &QuerySpec) -> Paginated<Category> {
        run_query(&self.store.categories.snapshot(), spec)
    }

    pub fn get(&self, id: ItemId) -> CatalogResult<Category> {
        self.store
            .categories
            .find_by_id(id)
            .ok_or_else(|| CatalogError::not_found("Category not found"))
    }

    pub fn create(&self, req: CreateCategoryRequest) -> CatalogResult<Category> {
        let name = require_field("name", &req.name)?;
        let slug = require_field("slug", &req.slug)?;

        self.store.categories.write(|rows| {
            if rows.iter().any(|c| is_duplicate(&c.name, &name)) {
                return Err(CatalogError::conflict(
                    "A category with this name already exists",
                ));
            }
            if rows.iter().any(|c| is_duplicate(&c.slug, &slug)) {
                return Err(CatalogError::conflict(
                    "A category with this slug already exists",
                ));
            }

            let now = Utc::now();
            let category = Category {
                id: self.store.categories.allocate_id(),
                name,
                slug,
                description: req.description.unwrap_or_default(),
                color: req.color.unwrap_or_default(),
                is_active: req.is_active.unwrap_or(true),
                sort_order: req
                    .sort_order
                    .unwrap_or_else(|| next_sort_order(rows)),
                created_at: now,
                updated_at: now,
            };
            rows.push(category.clone());
            Ok(category)
        })
    }

    pub fn update(&self, id: ItemId, req: UpdateCategoryRequest) -> CatalogResult<Category> {
        self.store.categories.write(|rows| {
            if !rows.iter().any(|c| c.id == id) {
                return Err(CatalogError::not_found("Category not found"));
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
                if rows.iter().any(|c| c.id != id && is_duplicate(&c.name, name)) {
                    return Err(CatalogError::conflict(
                        "A category with this name already exists",
                    ));
                }
            }
            if let Some(slug) = &slug {
                if rows.iter().any(|c| c.id != id && is_duplicate(&c.slug, slug)) {
                    return Err(CatalogError::conflict(
                        "A category with this slug already exists",
                    ));
                }
            }

            let row = rows
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| CatalogError::not_found("Category not found"))?;
            if let Some(name) = name {
                row.name = name;
            }
            if let Some(slug) = slug {
                row.slug = slug;
            }
            if let Some(description) = req.description {
                row.description = description;
            }
            if let Some(color) = req.color {
                row.color = color;
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

    pub fn delete(&self, id: ItemId) -> CatalogResult<Category> {
        self.store.categories.write(|rows| {
            let index = rows
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| CatalogError::not_found("Category not found"))?;
            Ok(rows.remove(index))
        })
    }
}

pub(crate) fn next_sort_order<T>(rows: &[T]) -> u32
where
    T: SortOrdered,
{
    rows.iter().map(|r| r.sort_order()).max().unwrap_or(0) + 1
}

/// Records carrying a manual ordering field.
pub(crate) trait SortOrdered {
    fn sort_order(&self) -> u32;
}

impl SortOrdered for Category {
    fn sort_order(&self) -> u32 {
        self.sort_order
    }
}

impl SortOrdered for colorbook_model::ThemePark {
    fn sort_order(&self) -> u32 {
        self.sort_order
    }
}

impl SortOrdered for colorbook_model::ColoringPage {
    fn sort_order(&self) -> u32 {
        self.sort_order
    }
}

impl SortOrdered for colorbook_model::Keyword {
    fn sort_order(&self) -> u32 {
        self.display_order
    }
}

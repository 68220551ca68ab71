use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use colorbook_model::{ColoringPage, Difficulty, ItemId};

use super::categories::next_sort_order;
use super::require_field;
use crate::api_types::Paginated;
use crate::error::{CatalogError, CatalogResult};
use crate::query::{run_query, QuerySpec};
use crate::store::CatalogStore;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePageRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Slug of an existing theme park; empty means no association.
    #[serde(default)]
    pub park_slug: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<u32>,
}

/// Partial update: absent fields keep their current value. Setting
/// `parkSlug` to an empty string clears the park association.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePageRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub park_slug: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub sort_order: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct PageService {
    store: Arc<CatalogStore>,
}

impl PageService {
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store }
    }

    /// Search pages grouped by category tag.
    pub fn search(&self, spec: &QuerySpec) -> Paginated<ColoringPage> {
        run_query(&self.store.pages.snapshot(), spec)
    }

    pub fn get(&self, id: ItemId) -> CatalogResult<ColoringPage> {
        self.store
            .pages
            .find_by_id(id)
            .ok_or_else(|| CatalogError::not_found("Page not found"))
    }

    pub fn create(&self, req: CreatePageRequest) -> CatalogResult<ColoringPage> {
        let title = require_field("title", &req.title)?;
        let park_slug = self.resolve_park_slug(req.park_slug.as_deref())?;

        let page = self.store.pages.write(|rows| {
            let now = Utc::now();
            let page = ColoringPage {
                id: self.store.pages.allocate_id(),
                title,
                description: req.description.unwrap_or_default(),
                category: req.category.map(|c| c.trim().to_string()).unwrap_or_default(),
                park_slug: park_slug.clone(),
                difficulty: req.difficulty.unwrap_or_default(),
                image_url: req.image_url.unwrap_or_default(),
                likes: 0,
                downloads: 0,
                is_active: req.is_active.unwrap_or(true),
                sort_order: req.sort_order.unwrap_or_else(|| next_sort_order(rows)),
                created_at: now,
                updated_at: now,
            };
            rows.push(page.clone());
            page
        });

        if let Some(slug) = &page.park_slug {
            self.adjust_park_count(slug, 1);
        }
        Ok(page)
    }

    pub fn update(&self, id: ItemId, req: UpdatePageRequest) -> CatalogResult<ColoringPage> {
        let title = req
            .title
            .as_deref()
            .map(|raw| require_field("title", raw))
            .transpose()?;
        // None: keep; Some(None): clear; Some(Some(slug)): reassign.
        let park_change = match req.park_slug.as_deref() {
            None => None,
            Some(raw) => Some(self.resolve_park_slug(Some(raw))?),
        };

        let (page, old_park) = self.store.pages.write(|rows| {
            let row = rows
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| CatalogError::not_found("Page not found"))?;

            let old_park = row.park_slug.clone();
            if let Some(title) = title {
                row.title = title;
            }
            if let Some(description) = req.description {
                row.description = description;
            }
            if let Some(category) = req.category {
                row.category = category.trim().to_string();
            }
            if let Some(new_park) = &park_change {
                row.park_slug = new_park.clone();
            }
            if let Some(difficulty) = req.difficulty {
                row.difficulty = difficulty;
            }
            if let Some(image_url) = req.image_url {
                row.image_url = image_url;
            }
            if let Some(is_active) = req.is_active {
                row.is_active = is_active;
            }
            if let Some(sort_order) = req.sort_order {
                row.sort_order = sort_order;
            }
            row.updated_at = Utc::now();
            Ok((row.clone(), old_park))
        })?;

        if let Some(new_park) = park_change {
            if old_park != new_park {
                if let Some(old) = &old_park {
                    self.adjust_park_count(old, -1);
                }
                if let Some(new) = &new_park {
                    self.adjust_park_count(new, 1);
                }
            }
        }
        Ok(page)
    }

    pub fn delete(&self, id: ItemId) -> CatalogResult<ColoringPage> {
        let removed = self.store.pages.write(|rows| {
            let index = rows
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| CatalogError::not_found("Page not found"))?;
            Ok(rows.remove(index))
        })?;

        if let Some(slug) = &removed.park_slug {
            self.adjust_park_count(slug, -1);
        }
        Ok(removed)
    }

    /// Like / unlike / download counters. Likes only ever go down through an
    /// explicit unlike, and never below zero.
    pub fn like(&self, id: ItemId) -> CatalogResult<ColoringPage> {
        self.touch(id, |page| page.likes += 1)
    }

    pub fn unlike(&self, id: ItemId) -> CatalogResult<ColoringPage> {
        self.touch(id, |page| page.likes = page.likes.saturating_sub(1))
    }

    pub fn record_download(&self, id: ItemId) -> CatalogResult<ColoringPage> {
        self.touch(id, |page| page.downloads += 1)
    }

    fn touch(
        &self,
        id: ItemId,
        apply: impl FnOnce(&mut ColoringPage),
    ) -> CatalogResult<ColoringPage> {
        self.store.pages.write(|rows| {
            let row = rows
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| CatalogError::not_found("Page not found"))?;
            apply(row);
            row.updated_at = Utc::now();
            Ok(row.clone())
        })
    }

    /// Normalize and validate a requested park association. Empty or
    /// whitespace-only clears the association; anything else must match an
    /// existing park slug.
    fn resolve_park_slug(&self, raw: Option<&str>) -> CatalogResult<Option<String>> {
        let Some(raw) = raw else { return Ok(None) };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let known = self
            .store
            .parks
            .read(|rows| rows.iter().any(|p| p.slug == trimmed));
        if !known {
            return Err(CatalogError::validation(format!(
                "Unknown theme park: {trimmed}"
            )));
        }
        Ok(Some(trimmed.to_string()))
    }

    fn adjust_park_count(&self, slug: &str, delta: i32) {
        self.store.parks.write(|rows| {
            if let Some(park) = rows.iter_mut().find(|p| p.slug == slug) {
                park.page_count = if delta >= 0 {
                    park.page_count.saturating_add(delta as u32)
                } else {
                    park.page_count.saturating_sub(delta.unsigned_abs())
                };
                park.updated_at = Utc::now();
            }
        });
    }
}

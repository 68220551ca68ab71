//! [`QueryItem`] implementations for the catalog entities, pinning down
//! which fields each type exposes for searching, tagging, and sorting.

use chrono::{DateTime, Utc};
use colorbook_model::{Category, ColoringPage, Keyword, ThemePark};

use super::engine::QueryItem;

impl QueryItem for ColoringPage {
    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.title, &self.description, &self.category]
    }

    fn group_tag(&self) -> Option<&str> {
        // Default grouping is the category tag; the theme-park search passes
        // its own accessor for `park_slug` instead.
        Some(&self.category)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn difficulty_rank(&self) -> Option<u8> {
        Some(self.difficulty.rank())
    }
}

impl QueryItem for ThemePark {
    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.name, &self.description]
    }

    fn group_tag(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn title(&self) -> &str {
        &self.name
    }
}

impl QueryItem for Keyword {
    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.keyword]
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn title(&self) -> &str {
        &self.keyword
    }
}

impl QueryItem for Category {
    fn searchable_text(&self) -> Vec<&str> {
        vec![&self.name, &self.description]
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn title(&self) -> &str {
        &self.name
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::ids::ItemId;

/// A browsing category such as "Animals" or "Vehicles".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: ItemId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Accent color used by the site when rendering the category tile.
    #[serde(default)]
    pub color: String,
    pub is_active: bool,
    pub sort_order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A theme-park landing page grouping coloring pages by park.
///
/// `page_count` is a dependent count: a park cannot be deleted while any
/// coloring pages still reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePark {
    pub id: ItemId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub page_count: u32,
    pub is_active: bool,
    pub sort_order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A promotional search keyword shown on the home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    pub id: ItemId,
    pub keyword: String,
    pub click_count: u64,
    pub display_order: u32,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Keyword {
    /// A keyword is publicly visible only while its flag is set and `today`
    /// falls inside the optional start/end date window.
    pub fn is_currently_active(&self, today: NaiveDate) -> bool {
        if !self.is_active {
            return false;
        }
        if let Some(start) = self.start_date {
            if start > today {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if end < today {
                return false;
            }
        }
        true
    }
}

/// A single printable coloring page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColoringPage {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Category tag. May be stored empty; readers display `"Other"` instead.
    #[serde(default)]
    pub category: String,
    /// Slug of the theme park this page belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub park_slug: Option<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub image_url: String,
    pub likes: u64,
    pub downloads: u64,
    pub is_active: bool,
    pub sort_order: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ColoringPage {
    /// Display label for the category; an empty tag normalizes to "Other".
    /// Computed at read time, never written back to the record.
    pub fn category_label(&self) -> &str {
        if self.category.trim().is_empty() {
            "Other"
        } else {
            &self.category
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn keyword(active: bool, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Keyword {
        let now = Utc::now();
        Keyword {
            id: ItemId(1),
            keyword: "dinosaur".to_string(),
            click_count: 0,
            display_order: 1,
            is_active: active,
            start_date: start,
            end_date: end,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn keyword_window_bounds_are_inclusive() {
        let today = Utc::now().date_naive();
        assert!(keyword(true, Some(today), Some(today)).is_currently_active(today));
        assert!(keyword(true, None, None).is_currently_active(today));
        assert!(!keyword(false, None, None).is_currently_active(today));
    }

    #[test]
    fn keyword_outside_window_is_inactive() {
        let today = Utc::now().date_naive();
        let tomorrow = today + Duration::days(1);
        let yesterday = today - Duration::days(1);
        assert!(!keyword(true, Some(tomorrow), None).is_currently_active(today));
        assert!(!keyword(true, None, Some(yesterday)).is_currently_active(today));
        assert!(keyword(true, Some(yesterday), Some(tomorrow)).is_currently_active(today));
    }
}

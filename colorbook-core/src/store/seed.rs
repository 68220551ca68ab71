//! Example rows the in-memory store boots from.
//!
//! TODO: replace with a real database once the persistence backend lands;
//! the services only touch the store through its collection surface, so the
//! swap stays contained here.

use chrono::{DateTime, NaiveDate, Utc};

use colorbook_model::{Category, ColoringPage, Difficulty, ItemId, Keyword, ThemePark};

fn ts(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn categories() -> Vec<Category> {
    let rows = [
        // (name, slug, description, color, sort)
        ("Animals", "animals", "Wild and friendly creatures", "#f59e0b", 1),
        ("Vehicles", "vehicles", "Cars, trucks, rockets and more", "#3b82f6", 2),
        ("Fantasy", "fantasy", "Castles, dragons and magic", "#8b5cf6", 3),
        ("Nature", "nature", "Forests, flowers and seasons", "#22c55e", 4),
        ("Holidays", "holidays", "Seasonal and festive scenes", "#ef4444", 5),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (name, slug, description, color, sort))| Category {
            id: ItemId(i as u64 + 1),
            name: name.to_string(),
            slug: slug.to_string(),
            description: description.to_string(),
            color: color.to_string(),
            is_active: true,
            sort_order: *sort,
            created_at: ts(1_735_700_000 + i as i64 * 60),
            updated_at: ts(1_735_700_000 + i as i64 * 60),
        })
        .collect()
}

pub fn theme_parks() -> Vec<ThemePark> {
    vec![
        ThemePark {
            id: ItemId(1),
            name: "Disney World".to_string(),
            slug: "disney-world".to_string(),
            description: "Pages from the most magical place on earth".to_string(),
            page_count: 3,
            is_active: true,
            sort_order: 1,
            created_at: ts(1_736_000_000),
            updated_at: ts(1_736_000_000),
        },
        ThemePark {
            id: ItemId(2),
            name: "Universal Studios".to_string(),
            slug: "universal-studios".to_string(),
            description: "Movie-themed rides and characters".to_string(),
            page_count: 2,
            is_active: true,
            sort_order: 2,
            created_at: ts(1_736_100_000),
            updated_at: ts(1_736_100_000),
        },
        ThemePark {
            id: ItemId(3),
            name: "Legoland".to_string(),
            slug: "legoland".to_string(),
            description: "Brick-built worlds".to_string(),
            page_count: 0,
            is_active: true,
            sort_order: 3,
            created_at: ts(1_736_200_000),
            updated_at: ts(1_736_200_000),
        },
    ]
}

pub fn keywords() -> Vec<Keyword> {
    vec![
        Keyword {
            id: ItemId(1),
            keyword: "dinosaur".to_string(),
            click_count: 128,
            display_order: 1,
            is_active: true,
            start_date: None,
            end_date: None,
            created_at: ts(1_736_300_000),
            updated_at: ts(1_736_300_000),
        },
        Keyword {
            id: ItemId(2),
            keyword: "unicorn".to_string(),
            click_count: 96,
            display_order: 2,
            is_active: true,
            start_date: None,
            end_date: None,
            created_at: ts(1_736_300_060),
            updated_at: ts(1_736_300_060),
        },
        Keyword {
            id: ItemId(3),
            keyword: "race car".to_string(),
            click_count: 54,
            display_order: 3,
            is_active: true,
            start_date: date(2025, 1, 1),
            end_date: date(2030, 12, 31),
            created_at: ts(1_736_300_120),
            updated_at: ts(1_736_300_120),
        },
        Keyword {
            id: ItemId(4),
            keyword: "小狗".to_string(),
            click_count: 77,
            display_order: 4,
            is_active: true,
            start_date: None,
            end_date: None,
            created_at: ts(1_736_300_180),
            updated_at: ts(1_736_300_180),
        },
        Keyword {
            id: ItemId(5),
            keyword: "汽车".to_string(),
            click_count: 31,
            display_order: 5,
            is_active: false,
            start_date: None,
            end_date: None,
            created_at: ts(1_736_300_240),
            updated_at: ts(1_736_300_240),
        },
        // Expired promotion: flag still set but the window has passed.
        Keyword {
            id: ItemId(6),
            keyword: "pumpkin".to_string(),
            click_count: 210,
            display_order: 6,
            is_active: true,
            start_date: date(2024, 10, 1),
            end_date: date(2024, 11, 5),
            created_at: ts(1_736_300_300),
            updated_at: ts(1_736_300_300),
        },
    ]
}

pub fn pages() -> Vec<ColoringPage> {
    let rows: [(&str, &str, &str, Option<&str>, Difficulty, bool, i64); 8] = [
        (
            "Mickey Mouse Castle Parade",
            "Mickey leads the parade in front of the castle",
            "Fantasy",
            Some("disney-world"),
            Difficulty::Easy,
            true,
            1_737_000_000,
        ),
        (
            "Space Mountain Rocket",
            "A rocket coaster racing through the dark",
            "Vehicles",
            Some("disney-world"),
            Difficulty::Medium,
            true,
            1_737_100_000,
        ),
        (
            "Enchanted Tea Cups",
            "Spinning tea cups at the fair",
            "Fantasy",
            Some("disney-world"),
            Difficulty::Easy,
            true,
            1_737_200_000,
        ),
        (
            "Jurassic Park T-Rex",
            "The king of dinosaurs breaks out",
            "Animals",
            Some("universal-studios"),
            Difficulty::Hard,
            true,
            1_737_300_000,
        ),
        (
            "Minion Banana Chase",
            "Minions chasing the last banana",
            "",
            Some("universal-studios"),
            Difficulty::Easy,
            true,
            1_737_400_000,
        ),
        (
            "Forest Fox Family",
            "A fox family in a cozy woodland den",
            "Animals",
            None,
            Difficulty::Medium,
            true,
            1_737_500_000,
        ),
        (
            "Monster Truck Rally",
            "Big wheels over bigger jumps",
            "Vehicles",
            None,
            Difficulty::Hard,
            true,
            1_737_600_000,
        ),
        (
            "Winter Snowflake Window",
            "Frost patterns on a winter window",
            "Holidays",
            None,
            Difficulty::Easy,
            false,
            1_737_700_000,
        ),
    ];

    rows.iter()
        .enumerate()
        .map(
            |(i, (title, description, category, park, difficulty, active, created))| ColoringPage {
                id: ItemId(i as u64 + 1),
                title: title.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                park_slug: park.map(str::to_string),
                difficulty: *difficulty,
                image_url: format!(
                    "https://images.colorbook.dev/pages/{}.png",
                    title.to_lowercase().replace(' ', "-")
                ),
                likes: (i as u64 + 1) * 7,
                downloads: (i as u64 + 1) * 12,
                is_active: *active,
                sort_order: i as u32 + 1,
                created_at: ts(*created),
                updated_at: ts(*created),
            },
        )
        .collect()
}

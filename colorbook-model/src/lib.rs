//! Domain types shared by the colorbook crates.
//!
//! Everything here is plain data: entity structs with serde derives and the
//! small value types (`ItemId`, `Difficulty`) they are built from. All wire
//! formats are camelCase, matching the JSON the catalog API speaks.

pub mod catalog;
pub mod difficulty;
pub mod ids;

pub use catalog::{Category, ColoringPage, Keyword, ThemePark};
pub use difficulty::Difficulty;
pub use ids::ItemId;

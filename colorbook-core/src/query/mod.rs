//! The catalog query engine: one filter/sort/paginate contract shared by
//! every listing endpoint, parameterized over which fields an item type
//! exposes for searching and sorting.

pub mod engine;
pub mod items;
pub mod types;

pub use engine::{run_query, run_query_by_tag, QueryItem};
pub use types::{QuerySpec, SortBy, StatusFilter, MAX_LIMIT, MIN_LIMIT};

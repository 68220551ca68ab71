//! In-memory item store.
//!
//! The catalog services and the query engine only ever see this store
//! through snapshot reads and closure-scoped writes, so a persistent backend
//! can replace it behind the same surface without touching query logic.

pub mod seed;

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use colorbook_model::{Category, ColoringPage, ItemId, Keyword, ThemePark};

/// Anything the store can hold: a record with a store-assigned id.
pub trait Record {
    fn id(&self) -> ItemId;
}

impl Record for Category {
    fn id(&self) -> ItemId {
        self.id
    }
}

impl Record for ThemePark {
    fn id(&self) -> ItemId {
        self.id
    }
}

impl Record for Keyword {
    fn id(&self) -> ItemId {
        self.id
    }
}

impl Record for ColoringPage {
    fn id(&self) -> ItemId {
        self.id
    }
}

/// One mutable collection of records.
///
/// Id assignment uses a high-water counter seeded at `max(existing) + 1`, so
/// a fresh collection assigns exactly `max + 1` and ids are never reused
/// after a deletion for the lifetime of the process.
pub struct Collection<T> {
    rows: RwLock<Vec<T>>,
    next_id: AtomicU64,
}

impl<T: Record + Clone> Collection<T> {
    pub fn new(rows: Vec<T>) -> Self {
        let high_water = rows.iter().map(|r| r.id().value()).max().unwrap_or(0);
        Self {
            rows: RwLock::new(rows),
            next_id: AtomicU64::new(high_water + 1),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Claim the next id. Called while holding the write side so creation is
    /// atomic with its uniqueness checks.
    pub fn allocate_id(&self) -> ItemId {
        ItemId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Read-only access to the rows.
    pub fn read<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let rows = self.rows.read();
        f(&rows)
    }

    /// Exclusive access for validate-then-mutate sequences.
    pub fn write<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let mut rows = self.rows.write();
        f(&mut rows)
    }

    /// Clone of the full collection, used as the query engine's snapshot.
    pub fn snapshot(&self) -> Vec<T> {
        self.rows.read().clone()
    }

    pub fn find_by_id(&self, id: ItemId) -> Option<T> {
        self.rows.read().iter().find(|r| r.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl<T: Record + Clone> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// The four catalog collections.
#[derive(Debug)]
pub struct CatalogStore {
    pub pages: Collection<ColoringPage>,
    pub parks: Collection<ThemePark>,
    pub keywords: Collection<Keyword>,
    pub categories: Collection<Category>,
}

impl CatalogStore {
    /// Store seeded with the example catalog rows. Until a real database
    /// arrives this is what the process boots from.
    pub fn seeded() -> Self {
        Self {
            pages: Collection::new(seed::pages()),
            parks: Collection::new(seed::theme_parks()),
            keywords: Collection::new(seed::keywords()),
            categories: Collection::new(seed::categories()),
        }
    }

    /// Empty store, primarily for tests that build their own fixtures.
    pub fn empty() -> Self {
        Self {
            pages: Collection::empty(),
            parks: Collection::empty(),
            keywords: Collection::empty(),
            categories: Collection::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_not_reused_after_deleting_the_newest_row() {
        let store = CatalogStore::seeded();
        let first = store.keywords.allocate_id();
        // Simulate create-then-delete of the newest record.
        store.keywords.write(|rows| rows.retain(|k| k.id() != first));
        let second = store.keywords.allocate_id();
        assert!(second > first);
    }

    #[test]
    fn seeded_collections_allocate_above_existing_max() {
        let store = CatalogStore::seeded();
        let max = store
            .parks
            .read(|rows| rows.iter().map(|p| p.id().value()).max().unwrap_or(0));
        assert_eq!(store.parks.allocate_id().value(), max + 1);
    }
}

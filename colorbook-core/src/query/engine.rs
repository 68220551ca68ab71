use chrono::{DateTime, Utc};

use crate::api_types::{PageMeta, Paginated};
use crate::query::types::{QuerySpec, SortBy};

/// What an item type exposes to the query engine: its searchable text, its
/// grouping tag, its visibility flag, and its sort keys.
pub trait QueryItem {
    /// Fields matched by the free-text filter, in match priority order.
    fn searchable_text(&self) -> Vec<&str>;

    /// Grouping tag compared exactly against the spec's tag filter. Items
    /// without a tag never survive an active tag filter.
    fn group_tag(&self) -> Option<&str> {
        None
    }

    fn is_active(&self) -> bool;

    fn created_at(&self) -> DateTime<Utc>;

    /// Primary text used by the `title` sort.
    fn title(&self) -> &str;

    /// Rank for the `difficulty` sort; items without one sort last.
    fn difficulty_rank(&self) -> Option<u8> {
        None
    }
}

/// Run one query against a snapshot of a collection, grouping by the item's
/// default tag ([`QueryItem::group_tag`]).
///
/// Pure over its inputs: the collection is only read, and the same call
/// against the same snapshot always produces the same output, tie order
/// included (the sort is stable and no secondary key is applied). Bounds
/// validation is the caller's job; a `page` past the end simply yields an
/// empty slice.
pub fn run_query<T: QueryItem + Clone>(items: &[T], spec: &QuerySpec) -> Paginated<T> {
    run_query_by_tag(items, spec, T::group_tag)
}

/// [`run_query`] with an explicit grouping-tag accessor, for endpoints that
/// group the same records by a different dimension (the theme-park search
/// groups coloring pages by park slug instead of category).
pub fn run_query_by_tag<T, F>(items: &[T], spec: &QuerySpec, tag_of: F) -> Paginated<T>
where
    T: QueryItem + Clone,
    F: Fn(&T) -> Option<&str>,
{
    let term = spec.term.trim().to_lowercase();

    let mut matched: Vec<&T> = items
        .iter()
        .filter(|item| {
            matches_term(*item, &term)
                && matches_tag(tag_of(*item), spec)
                && spec.status.accepts(item.is_active())
        })
        .collect();

    match spec.sort {
        SortBy::Newest => matched.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        SortBy::Oldest => matched.sort_by(|a, b| a.created_at().cmp(&b.created_at())),
        SortBy::Title => {
            matched.sort_by(|a, b| a.title().to_lowercase().cmp(&b.title().to_lowercase()))
        }
        SortBy::Difficulty => matched.sort_by(|a, b| {
            difficulty_key(*a).cmp(&difficulty_key(*b))
        }),
    }

    let total_count = matched.len();
    let total_pages = if total_count == 0 {
        0
    } else {
        total_count.div_ceil(spec.limit)
    };
    let start = (spec.page - 1).saturating_mul(spec.limit);

    let items = matched
        .into_iter()
        .skip(start)
        .take(spec.limit)
        .cloned()
        .collect();

    Paginated {
        items,
        pagination: PageMeta {
            current_page: spec.page,
            total_pages,
            total_count,
            has_next_page: spec.page < total_pages,
            has_prev_page: spec.page > 1,
            limit: spec.limit,
        },
    }
}

fn matches_term<T: QueryItem>(item: &T, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    item.searchable_text()
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}

fn matches_tag(tag: Option<&str>, spec: &QuerySpec) -> bool {
    if spec.tag_is_wildcard() {
        return true;
    }
    tag == Some(spec.tag.as_str())
}

fn difficulty_key<T: QueryItem>(item: &T) -> u8 {
    item.difficulty_rank().unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::StatusFilter;
    use chrono::TimeZone;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        title: String,
        blurb: String,
        tag: Option<String>,
        active: bool,
        created: DateTime<Utc>,
        rank: Option<u8>,
    }

    impl Row {
        fn new(title: &str, created_secs: i64) -> Self {
            Self {
                title: title.to_string(),
                blurb: String::new(),
                tag: None,
                active: true,
                created: Utc.timestamp_opt(created_secs, 0).unwrap(),
                rank: None,
            }
        }

        fn with_tag(mut self, tag: &str) -> Self {
            self.tag = Some(tag.to_string());
            self
        }

        fn with_blurb(mut self, blurb: &str) -> Self {
            self.blurb = blurb.to_string();
            self
        }

        fn with_rank(mut self, rank: u8) -> Self {
            self.rank = Some(rank);
            self
        }

        fn inactive(mut self) -> Self {
            self.active = false;
            self
        }
    }

    impl QueryItem for Row {
        fn searchable_text(&self) -> Vec<&str> {
            vec![&self.title, &self.blurb]
        }

        fn group_tag(&self) -> Option<&str> {
            self.tag.as_deref()
        }

        fn is_active(&self) -> bool {
            self.active
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created
        }

        fn title(&self) -> &str {
            &self.title
        }

        fn difficulty_rank(&self) -> Option<u8> {
            self.rank
        }
    }

    fn spec(limit: usize) -> QuerySpec {
        QuerySpec::all(limit)
    }

    #[test]
    fn term_matches_any_searchable_field_case_insensitively() {
        let rows = vec![
            Row::new("Jurassic Park T-Rex", 300).with_tag("universal-studios"),
            Row::new("Forest Fox Family", 200).with_blurb("a cozy woodland scene"),
            Row::new("Monster Truck Rally", 100),
        ];

        let mut q = spec(20);
        q.term = "T-REX".to_string();
        let page = run_query(&rows, &q);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Jurassic Park T-Rex");

        q.term = "woodland".to_string();
        let page = run_query(&rows, &q);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Forest Fox Family");
    }

    #[test]
    fn term_filter_ignores_tag_wildcard() {
        // Searching "t-rex" with tag filter "all" must still return just the
        // one matching row.
        let rows = vec![
            Row::new("Jurassic Park T-Rex", 300).with_tag("universal-studios"),
            Row::new("Mickey Mouse Castle Parade", 200).with_tag("disney-world"),
            Row::new("Forest Fox Family", 100),
        ];
        let mut q = spec(20);
        q.term = "t-rex".to_string();
        q.tag = "all".to_string();
        let page = run_query(&rows, &q);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Jurassic Park T-Rex");
    }

    #[test]
    fn tag_filter_is_exact() {
        let rows = vec![
            Row::new("a", 3).with_tag("disney-world"),
            Row::new("b", 2).with_tag("disney-worldwide"),
            Row::new("c", 1),
        ];
        let mut q = spec(20);
        q.tag = "disney-world".to_string();
        let page = run_query(&rows, &q);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "a");
    }

    #[test]
    fn tag_accessor_parameterizes_grouping() {
        let rows = vec![
            Row::new("a", 3).with_tag("animals").with_blurb("universal-studios"),
            Row::new("b", 2).with_tag("animals"),
        ];
        let mut q = spec(10);
        q.tag = "universal-studios".to_string();

        // Grouped by the default tag nothing matches; grouped by the blurb
        // accessor the first row does.
        assert_eq!(run_query(&rows, &q).items.len(), 0);
        let by_blurb = run_query_by_tag(&rows, &q, |r| {
            (!r.blurb.is_empty()).then_some(r.blurb.as_str())
        });
        assert_eq!(by_blurb.items.len(), 1);
        assert_eq!(by_blurb.items[0].title, "a");
    }

    #[test]
    fn status_filter_selects_by_active_flag() {
        let rows = vec![Row::new("on", 2), Row::new("off", 1).inactive()];
        let mut q = spec(20);
        q.status = StatusFilter::Active;
        assert_eq!(run_query(&rows, &q).items[0].title, "on");
        q.status = StatusFilter::Inactive;
        assert_eq!(run_query(&rows, &q).items[0].title, "off");
        q.status = StatusFilter::Any;
        assert_eq!(run_query(&rows, &q).pagination.total_count, 2);
    }

    #[test]
    fn sort_newest_and_oldest_are_monotonic() {
        let rows = vec![Row::new("mid", 200), Row::new("new", 300), Row::new("old", 100)];
        let mut q = spec(20);
        let newest = run_query(&rows, &q);
        let stamps: Vec<_> = newest.items.iter().map(|r| r.created).collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(newest.items[0].title, "new");

        q.sort = SortBy::Oldest;
        let oldest = run_query(&rows, &q);
        let stamps: Vec<_> = oldest.items.iter().map(|r| r.created).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(oldest.items[0].title, "old");
    }

    #[test]
    fn sort_title_is_case_insensitive() {
        let rows = vec![Row::new("banana", 1), Row::new("Apple", 2), Row::new("cherry", 3)];
        let mut q = spec(20);
        q.sort = SortBy::Title;
        let page = run_query(&rows, &q);
        let titles: Vec<_> = page.items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn sort_difficulty_orders_easy_medium_hard() {
        let rows = vec![
            Row::new("hard", 1).with_rank(3),
            Row::new("easy", 2).with_rank(1),
            Row::new("medium", 3).with_rank(2),
        ];
        let mut q = spec(20);
        q.sort = SortBy::Difficulty;
        let page = run_query(&rows, &q);
        let titles: Vec<_> = page.items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["easy", "medium", "hard"]);
    }

    #[test]
    fn ties_keep_input_order_and_reruns_are_identical() {
        let rows = vec![
            Row::new("first", 100),
            Row::new("second", 100),
            Row::new("third", 100),
        ];
        let q = spec(20);
        let once = run_query(&rows, &q);
        let twice = run_query(&rows, &q);
        let titles: Vec<_> = once.items.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
        assert_eq!(once.items, twice.items);
    }

    #[test]
    fn concatenated_pages_reproduce_the_full_filtered_set() {
        let rows: Vec<Row> = (0..23)
            .map(|i| Row::new(&format!("row-{i:02}"), 1000 - i))
            .collect();
        let mut q = spec(5);
        q.sort = SortBy::Title;

        let expected: Vec<String> = {
            let mut full = spec(50);
            full.sort = SortBy::Title;
            run_query(&rows, &full)
                .items
                .iter()
                .map(|r| r.title.clone())
                .collect()
        };

        let total_pages = run_query(&rows, &q).pagination.total_pages;
        assert_eq!(total_pages, 5);

        let mut gathered = Vec::new();
        for page in 1..=total_pages {
            q.page = page;
            let result = run_query(&rows, &q);
            assert_eq!(result.pagination.has_prev_page, page > 1);
            assert_eq!(result.pagination.has_next_page, page < total_pages);
            gathered.extend(result.items.iter().map(|r| r.title.clone()));
        }
        assert_eq!(gathered, expected);
    }

    #[test]
    fn page_beyond_total_pages_is_empty_not_an_error() {
        let rows: Vec<Row> = (0..12).map(|i| Row::new(&format!("r{i}"), i)).collect();
        let mut q = spec(20);
        q.page = 3;
        let page = run_query(&rows, &q);
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_count, 12);
        assert_eq!(page.pagination.total_pages, 1);
        assert!(!page.pagination.has_next_page);
        assert!(page.pagination.has_prev_page);
    }

    #[test]
    fn empty_collection_reports_zero_pages() {
        let rows: Vec<Row> = Vec::new();
        let page = run_query(&rows, &spec(10));
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
        assert_eq!(page.pagination.total_count, 0);
        assert!(!page.pagination.has_next_page);
    }

    #[test]
    fn whitespace_only_term_matches_everything() {
        let rows = vec![Row::new("a", 1), Row::new("b", 2)];
        let mut q = spec(10);
        q.term = "   ".to_string();
        assert_eq!(run_query(&rows, &q).pagination.total_count, 2);
    }
}

//! Pure derivations over a record snapshot: filtering, pagination and the
//! category sidebar.

use std::collections::BTreeSet;

use crate::types::record::{FilterTag, Page, Record};

/// Case-insensitive substring match on title, category and description.
/// An empty search matches everything.
pub fn matches_search(record: &Record, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    [&record.title, &record.category, &record.description]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Records visible under `filter` and `search`, in snapshot order.
///
/// The trash view shows only archived records; every other view excludes them.
pub fn list(records: &[Record], filter: &FilterTag, search: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|r| match filter {
            FilterTag::Archived => r.archived,
            FilterTag::All => !r.archived,
            FilterTag::Category(c) => !r.archived && r.category == *c,
        })
        .filter(|r| matches_search(r, search))
        .cloned()
        .collect()
}

/// `ceil(count / page_size)`; zero when there is nothing to show.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Slices one page out of `subset`. Pages are 1-based; a page past the end
/// yields no items but keeps its number.
pub fn paginate(subset: Vec<Record>, page_size: usize, page: usize) -> Page {
    let size = page_size.max(1);
    let total_items = subset.len();
    let total_pages = total_pages(total_items, size);

    let start = page.saturating_sub(1).saturating_mul(size);
    let items: Vec<Record> = subset.into_iter().skip(start).take(size).collect();

    Page {
        items,
        page,
        total_pages,
        total_items,
        has_previous: page > 1,
        has_next: page < total_pages,
        show_controls: total_pages > 1,
    }
}

/// Distinct non-empty categories of active records, sorted.
pub fn categories(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .filter(|r| !r.archived && !r.category.is_empty())
        .map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

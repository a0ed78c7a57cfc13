//! Client-side list filtering.
//!
//! Matching is a plain case-insensitive substring test over the fields a
//! record exposes through [`Resource::search_fields`]. The query is not
//! trimmed; an empty query matches everything.

use crate::resource::Resource;

/// Whether any of `fields` contains `query`, ignoring case.
pub fn matches_query(fields: &[&str], query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Return the records matching `query`, preserving their order.
pub fn filter_records<'a, R: Resource>(items: &'a [R], query: &str) -> Vec<&'a R> {
    items
        .iter()
        .filter(|item| matches_query(&item.search_fields(), query))
        .collect()
}

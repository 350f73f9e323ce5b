//! Filter and sort over in-memory records
//!
//! Every call recomputes the view from the full source list. Lists handled
//! here are page-sized, so there is no incremental update path.

use std::cmp::Ordering;

use super::criteria::{ListQuery, SortKey};
use super::page::{Page, paginate};
use crate::records::Record;

/// Whether `record` contains the search string in any of `fields`
///
/// Case-insensitive substring match over the space-joined field values.
/// A blank query matches everything.
#[must_use]
pub fn matches_query<T: Record>(record: &T, query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let haystack = fields
        .iter()
        .filter_map(|field| record.field(field))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    haystack.contains(&needle)
}

/// Whether `record` satisfies every active field filter
#[must_use]
pub fn matches_filters<T: Record>(record: &T, query: &ListQuery) -> bool {
    query
        .active_filters()
        .all(|(field, expected)| record.field(field).is_some_and(|actual| actual == expected))
}

/// Compare two records under `sort`; missing values go last
#[must_use]
pub fn compare<T: Record>(a: &T, b: &T, sort: SortKey) -> Ordering {
    match sort.text_field() {
        None => missing_last(a.timestamp(), b.timestamp(), |x, y| {
            if sort == SortKey::DateDesc {
                y.cmp(x)
            } else {
                x.cmp(y)
            }
        }),
        Some(field) => missing_last(a.field(field), b.field(field), |x, y| collate(x, y)),
    }
}

fn missing_last<V>(a: Option<V>, b: Option<V>, cmp: impl FnOnce(&V, &V) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(&x, &y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Case-insensitive collation with a byte-order tiebreak
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Filter and sort `items` under `query`
///
/// `fields` names the fields searched by the free-text query. Sorting is
/// stable, so ties keep input order.
#[must_use]
pub fn process<'a, T: Record>(items: &'a [T], query: &ListQuery, fields: &[&str]) -> Vec<&'a T> {
    let mut view: Vec<&T> = items
        .iter()
        .filter(|item| matches_query(*item, &query.query, fields))
        .filter(|item| matches_filters(*item, query))
        .collect();

    view.sort_by(|a, b| compare(*a, *b, query.sort));

    tracing::debug!(
        source = items.len(),
        matched = view.len(),
        sort = %query.sort,
        "processed list view"
    );
    view
}

/// Full pipeline over one source list
///
/// Uses the caller's search fields, or the record type's defaults when none
/// are given.
#[derive(Debug, Clone)]
pub struct ListView<'a, T: Record> {
    source: &'a [T],
    query: ListQuery,
    fields: Vec<&'a str>,
}

impl<'a, T: Record> ListView<'a, T> {
    #[must_use]
    pub fn new(source: &'a [T], query: ListQuery) -> Self {
        Self {
            source,
            query,
            fields: Vec::new(),
        }
    }

    /// Search these fields instead of the record defaults
    #[must_use]
    pub fn search_fields(mut self, fields: &[&'a str]) -> Self {
        self.fields = fields.to_vec();
        self
    }

    /// The criteria this view applies
    #[must_use]
    pub const fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Filtered and sorted items
    #[must_use]
    pub fn items(&self) -> Vec<&'a T> {
        if self.fields.is_empty() {
            let defaults = self
                .source
                .first()
                .map_or(&[][..], Record::default_search_fields);
            process(self.source, &self.query, defaults)
        } else {
            process(self.source, &self.query, &self.fields)
        }
    }

    /// One page of the filtered and sorted items, page number clamped
    #[must_use]
    pub fn page(&self, page: usize, limit: usize) -> Page<&'a T> {
        paginate(self.items(), page, limit)
    }
}

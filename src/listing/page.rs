//! Pagination over an already filtered list

use serde::Serialize;
use std::ops::Range;

/// One page of a list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// 1-based page number actually shown
    pub page: usize,
    /// Page size
    pub limit: usize,
    /// Number of items across all pages
    pub total: usize,
    /// Number of pages, at least 1
    pub total_pages: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index range of the items shown, `None` on an empty page
    ///
    /// Page 0 reads as page 1.
    #[must_use]
    pub fn shown(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let skipped = self.page.saturating_sub(1).saturating_mul(self.limit);
        let first = skipped.saturating_add(1);
        Some((first, skipped.saturating_add(self.items.len())))
    }
}

/// Number of pages for `total` items, never less than 1
///
/// A `limit` of 0 is treated as 1.
///
/// # Examples
/// ```
/// # use storedesk::listing::total_pages;
/// assert_eq!(total_pages(25, 10), 3);
/// assert_eq!(total_pages(0, 10), 1);
/// ```
#[must_use]
pub fn total_pages(total: usize, limit: usize) -> usize {
    total.div_ceil(limit.max(1)).max(1)
}

/// Clamp a requested page into `[1, total_pages]`
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

fn page_range(page: usize, limit: usize, len: usize) -> Range<usize> {
    let limit = limit.max(1);
    let start = page.max(1).saturating_sub(1).saturating_mul(limit).min(len);
    let end = start.saturating_add(limit).min(len);
    start..end
}

/// Items `[(page-1)*limit, page*limit)` of `items`
///
/// Pages past the end give an empty slice rather than panicking. Page 0 is
/// read as page 1. No clamping happens here; see [`paginate`].
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, limit: usize) -> &[T] {
    &items[page_range(page, limit, items.len())]
}

/// Clamp `page` to the available pages and take that page of `items`
#[must_use]
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Page<T> {
    let limit = limit.max(1);
    let total = items.len();
    let total_pages = total_pages(total, limit);
    let page = clamp_page(page, total_pages);
    let range = page_range(page, limit, total);

    let items = items
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect();

    Page {
        items,
        page,
        limit,
        total,
        total_pages,
    }
}

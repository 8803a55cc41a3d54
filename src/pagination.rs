//! Page arithmetic shared by the API and the list controller.

use serde::{Deserialize, Serialize};

/// Number of rows served per page on every list endpoint.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Pagination block of a list response.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    /// Number of rows matching the query.
    pub total: usize,
    /// Page actually served, after clamping.
    pub page: usize,
    /// Number of pages available.
    pub pages: usize,
}

impl PaginationMeta {
    /// Builds the block for `total` rows when `requested` page was asked for.
    pub fn new(total: usize, requested: usize, per_page: usize) -> Self {
        let pages = total_pages(total, per_page);
        Self {
            total,
            page: clamp_page(requested, pages),
            pages,
        }
    }
}

/// Number of pages needed to show `total` rows.
pub fn total_pages(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Clamps `page` into `[1, pages]`; an empty collection still has page 1.
pub fn clamp_page(page: usize, pages: usize) -> usize {
    page.clamp(1, pages.max(1))
}

/// Zero-based row offset of `page`.
pub fn offset(page: usize, per_page: usize) -> usize {
    (page.max(1) - 1) * per_page
}

fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Page numbers to render in pagination controls; `None` marks a gap.
pub fn page_links(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    let current_page = clamp_page(current_page, total_pages);
    get_pages(total_pages, current_page, 2, 2, 4, 2)
}

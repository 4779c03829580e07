//! Pagination over already-fetched collections.
//!
//! List endpoints read a whole collection and slice it here; the total is
//! reported so the UI can render page controls.

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults; returns the 0-based page index and page size.
    pub fn normalize(self) -> (usize, usize) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as usize, per_page as usize)
    }

    /// Cut one page out of `items`. A page past the end is empty.
    pub fn apply<T>(self, items: Vec<T>) -> Page<T> {
        let (idx, per_page) = self.normalize();
        let total = items.len();
        let items = items.into_iter().skip(idx.saturating_mul(per_page)).take(per_page).collect();
        Page { items, total, page: idx + 1, per_page }
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One page of results.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page size for history listings.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Upper bound on page size.
pub const MAX_PER_PAGE: usize = 100;

/// Generic pagination parameters (`?page=&per_page=`), 1-based.
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl PageParams {
    /// Resolve defaults and clamps: `page >= 1`, `1 <= per_page <= 100`.
    ///
    /// Out-of-range pages are not an error; the store answers them with an
    /// empty slice.
    pub fn resolve(&self) -> (usize, usize) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        (page, per_page)
    }
}

/// Search parameters (`?q=`). A missing query matches everything.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

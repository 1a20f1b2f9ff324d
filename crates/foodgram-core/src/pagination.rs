// ABOUTME: Page-number pagination for list endpoints
// ABOUTME: Converts page/limit query parameters to offsets and builds the count/next/previous envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::limits;

/// Requested page, 1-based, with a bounded page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number starting at 1
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl PageRequest {
    /// Build a page request from optional query values
    ///
    /// Missing or zero values fall back to page 1 and `default_limit`;
    /// the limit is capped at [`limits::MAX_PAGE_SIZE`].
    #[must_use]
    pub fn from_query(page: Option<u32>, limit: Option<u32>, default_limit: u32) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(default_limit)
            .min(limits::MAX_PAGE_SIZE);
        Self { page, limit }
    }

    /// Row offset of the first item of this page
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    /// Page size as a SQL bind value
    #[must_use]
    pub const fn sql_limit(&self) -> i64 {
        self.limit as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: limits::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of items across all pages
    pub count: u64,
    /// Query string of the next page, if any
    pub next: Option<String>,
    /// Query string of the previous page, if any
    pub previous: Option<String>,
    /// Items on this page
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Assemble a page from its items and the total count
    #[must_use]
    pub fn new(results: Vec<T>, count: u64, request: PageRequest) -> Self {
        let shown = u64::from(request.page) * u64::from(request.limit);
        let next = (shown < count).then(|| page_link(request.page + 1, request.limit));
        let previous = (request.page > 1).then(|| page_link(request.page - 1, request.limit));
        Self {
            count,
            next,
            previous,
            results,
        }
    }

    /// Transform every item while keeping pagination metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

fn page_link(page: u32, limit: u32) -> String {
    format!("?page={page}&limit={limit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults_and_cap() {
        let request = PageRequest::from_query(None, Some(0), 6);
        assert_eq!(request, PageRequest { page: 1, limit: 6 });

        let request = PageRequest::from_query(Some(3), Some(1000), 6);
        assert_eq!(request.limit, limits::MAX_PAGE_SIZE);
        assert_eq!(request.offset(), 200);
    }

    #[test]
    fn test_page_links() {
        let request = PageRequest { page: 2, limit: 2 };
        let page = Page::new(vec![3, 4], 5, request);
        assert_eq!(page.next.as_deref(), Some("?page=3&limit=2"));
        assert_eq!(page.previous.as_deref(), Some("?page=1&limit=2"));

        let last = Page::new(vec![5], 5, PageRequest { page: 3, limit: 2 });
        assert!(last.next.is_none());
    }
}

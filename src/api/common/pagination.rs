//
//  codeship-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Codeship API Responses
//!
//! Codeship paginates list endpoints with page numbers: a request carries
//! `per_page` and `page` query parameters, and the response reports the
//! `page`, `per_page` and `total` it was served with.
//!
//! ```text
//! total = 75, per_page = 30
//!
//! page 1 -> items  1..30   next = page 2
//! page 2 -> items 31..60   next = page 3
//! page 3 -> items 61..75   next = none
//! ```
//!
//! # Notes
//!
//! - The next page number counts from the page that was requested, so a
//!   response without `page` still moves the listing forward
//! - A `per_page` of zero never reports more pages
//! - The next page reuses the `per_page` reported by the server

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not choose one.
pub const DEFAULT_PER_PAGE: u32 = 30;

/// First page number; Codeship pages are 1-based.
pub const DEFAULT_PAGE: u32 = 1;

/// Where a paginated listing starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub per_page: u32,
    pub page: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: DEFAULT_PAGE,
        }
    }
}

impl PageOptions {
    pub fn new(per_page: u32, page: u32) -> Self {
        Self { per_page, page }
    }

    /// Query pairs in the order Codeship documents them: `per_page`, then `page`.
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("per_page".to_string(), self.per_page.to_string()),
            ("page".to_string(), self.page.to_string()),
        ]
    }
}

/// Pagination metadata returned alongside every page of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub per_page: u32,

    #[serde(default)]
    pub total: u64,
}

impl PageInfo {
    /// Number of pages needed to hold `total` items.
    pub fn total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.per_page))
    }

    /// Options for the page after `requested`, or `None` once `requested`
    /// reaches the last page.
    pub fn next_after(&self, requested: PageOptions) -> Option<PageOptions> {
        if u64::from(requested.page) >= self.total_pages() {
            return None;
        }
        let page = requested.page.checked_add(1)?;
        Some(PageOptions::new(self.per_page, page))
    }
}

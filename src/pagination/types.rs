//! Pagination types
//!
//! A [`Page`] is what one call to a list endpoint returns.

use serde::{Deserialize, Serialize};

/// One page of a cursor-paginated list
///
/// `items` are in server order. A missing `next_cursor` marks the last page;
/// a present one says nothing about whether the next page has items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Cursor for the following page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// Create a page that points at a following page
    pub fn new(items: Vec<T>, next_cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Some(next_cursor.into()),
        }
    }

    /// Create the final page of a listing
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// The cursor to continue with, if any
    ///
    /// An empty cursor string is treated the same as no cursor.
    pub fn continuation(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }

    /// Check if this is the last page
    pub fn is_last(&self) -> bool {
        self.continuation().is_none()
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Query parameters for a list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Cursor from the previous page
    pub cursor: Option<String>,
    /// Maximum items per page
    pub limit: Option<u32>,
}

impl ListParams {
    /// Create params for the first page
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cursor
    #[must_use]
    pub fn cursor(mut self, cursor: Option<String>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render as query pairs
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(cursor) = &self.cursor {
            query.push(("cursor".to_string(), cursor.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        query
    }
}

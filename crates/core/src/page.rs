//! Offset-based pagination.
//!
//! The API has no total count: a page that comes back full is assumed to
//! have a successor, a short page is the last one.

use serde::{Deserialize, Serialize};

/// Pagination position for a cached resource list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cursor {
    /// Offset of the most recently fetched page.
    pub offset: u32,
    /// Page size.
    pub limit: u32,
    /// Whether another page may exist.
    pub has_more: bool,
}

impl Cursor {
    /// A cursor at the start of a list with the given page size.
    #[must_use]
    pub const fn start(limit: u32) -> Self {
        Self {
            offset: 0,
            limit,
            has_more: true,
        }
    }

    /// Offset of the page after the current one.
    #[must_use]
    pub const fn next_offset(&self) -> u32 {
        self.offset.saturating_add(self.limit)
    }

    /// Rewind to the first page, keeping the page size.
    pub const fn reset(&mut self) {
        *self = Self::start(self.limit);
    }
}

/// One page of a list response, annotated with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items in this page, in server order.
    pub items: Vec<T>,
    /// The offset that was requested.
    pub offset: u32,
    /// The limit that was requested.
    pub limit: u32,
    /// `true` iff the page came back full.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Wrap a raw list response, deriving `has_more` from its length.
    #[must_use]
    pub fn from_items(items: Vec<T>, offset: u32, limit: u32) -> Self {
        let has_more = usize::try_from(limit).is_ok_and(|limit| items.len() == limit);
        Self {
            items,
            offset,
            limit,
            has_more,
        }
    }

    /// Whether this is the first page of the list.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.offset == 0
    }
}

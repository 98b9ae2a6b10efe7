//! Cached entity list shared by the category and product slices.

use catalog_admin_core::{Cursor, Entity, Page, RequestStatus};
use serde::Serialize;

use super::Phase;

/// Sequence number tagging a list request.
///
/// Only the most recently issued ticket for a collection may change its
/// list. Resetting the collection retires every outstanding ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Ticket(u64);

impl Ticket {
    /// The raw sequence number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A cached, paginated list of entities plus request bookkeeping.
#[derive(Debug, Clone)]
pub struct Collection<T: Entity> {
    /// Cached items in display order.
    pub items: Vec<T>,
    /// Item opened in a detail view.
    pub selected: Option<T>,
    /// Pagination position.
    pub cursor: Cursor,
    /// Status of the most recent request.
    pub status: RequestStatus,
    /// Message of the most recent failure.
    pub error: Option<String>,
    latest_ticket: u64,
}

impl<T: Entity> Collection<T> {
    /// Empty collection paging `limit` items at a time.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            cursor: Cursor::start(limit),
            status: RequestStatus::Idle,
            error: None,
            latest_ticket: 0,
        }
    }

    /// Whether any request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Whether another page can be requested right now.
    #[must_use]
    pub const fn can_load_more(&self) -> bool {
        self.cursor.has_more && !self.is_loading()
    }

    /// Find a cached item by id.
    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Issue the ticket for a new list request, superseding earlier ones.
    pub(crate) const fn issue_ticket(&mut self) -> Ticket {
        self.latest_ticket += 1;
        Ticket(self.latest_ticket)
    }

    /// Whether `ticket` belongs to the latest list request.
    #[must_use]
    pub const fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest_ticket
    }

    /// Empty the cache and rewind the cursor, retiring in-flight list requests.
    pub fn reset(&mut self) {
        self.items.clear();
        self.cursor.reset();
        self.latest_ticket += 1;
        if self.status.is_loading() {
            self.status = RequestStatus::Idle;
        }
    }

    pub(crate) fn clear_selected(&mut self) {
        self.selected = None;
    }

    /// Apply one phase of an async operation.
    ///
    /// `pending` clears the error and marks the collection loading,
    /// `rejected` records the message (or `fallback` when the message is
    /// empty) and leaves the cache alone, and `fulfilled` hands the payload
    /// to `on_fulfilled`.
    pub(crate) fn apply<P>(
        &mut self,
        phase: Phase<P>,
        fallback: &str,
        on_fulfilled: impl FnOnce(&mut Self, P),
    ) {
        match phase {
            Phase::Pending => {
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            Phase::Fulfilled(payload) => {
                self.status = RequestStatus::Succeeded;
                on_fulfilled(self, payload);
            }
            Phase::Rejected(message) => {
                self.status = RequestStatus::Failed;
                self.error = Some(if message.trim().is_empty() {
                    fallback.to_string()
                } else {
                    message
                });
            }
        }
    }

    /// Merge a fetched page: the first page replaces the cache, later pages
    /// append. Items are not de-duplicated.
    ///
    /// The cursor keeps its configured page size; a one-off larger fetch
    /// must not change what later pages request.
    pub(crate) fn merge_page(&mut self, page: Page<T>) {
        if page.is_first() {
            self.items = page.items;
        } else {
            self.items.extend(page.items);
        }
        self.cursor.offset = page.offset;
        self.cursor.has_more = page.has_more;
    }

    /// Replace the cache with search results and stop pagination.
    pub(crate) fn replace_with_search(&mut self, items: Vec<T>) {
        self.items = items;
        self.cursor.has_more = false;
    }

    pub(crate) fn select(&mut self, item: T) {
        self.selected = Some(item);
    }

    pub(crate) fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Replace the cached item with the same id and refresh the selection.
    pub(crate) fn replace(&mut self, item: T)
    where
        T: Clone,
    {
        if let Some(slot) = self.items.iter_mut().find(|cached| cached.id() == item.id()) {
            *slot = item.clone();
        }
        if self.selected.as_ref().is_some_and(|s| s.id() == item.id()) {
            self.selected = Some(item);
        }
    }

    /// Drop the item with `id` from the cache and the selection.
    pub(crate) fn remove(&mut self, id: &T::Id) {
        self.items.retain(|item| item.id() != id);
        if self.selected.as_ref().is_some_and(|s| s.id() == id) {
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        label: &'static str,
    }

    impl Entity for Item {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    const fn item(id: u32, label: &'static str) -> Item {
        Item { id, label }
    }

    fn ids(collection: &Collection<Item>) -> Vec<u32> {
        collection.items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_first_page_replaces_later_pages_append() {
        let mut c = Collection::new(2);
        c.items = vec![item(9, "old")];

        c.merge_page(Page::from_items(vec![item(1, "a"), item(2, "b")], 0, 2));
        assert_eq!(ids(&c), vec![1, 2]);
        assert!(c.cursor.has_more);

        c.merge_page(Page::from_items(vec![item(3, "c")], 2, 2));
        assert_eq!(ids(&c), vec![1, 2, 3]);
        assert_eq!(c.cursor.offset, 2);
        assert!(!c.cursor.has_more);
    }

    #[test]
    fn test_oversized_fetch_keeps_page_size() {
        let mut c = Collection::new(2);
        c.merge_page(Page::from_items(vec![item(1, "a"), item(2, "b")], 0, 1000));
        assert_eq!(c.cursor.limit, 2);
        assert!(!c.cursor.has_more);

        c.reset();
        assert_eq!(c.cursor, Cursor::start(2));
    }

    #[test]
    fn test_pages_are_not_deduplicated() {
        let mut c = Collection::new(1);
        c.merge_page(Page::from_items(vec![item(1, "a")], 0, 1));
        c.merge_page(Page::from_items(vec![item(1, "a")], 1, 1));
        assert_eq!(ids(&c), vec![1, 1]);
    }

    #[test]
    fn test_search_disables_pagination() {
        let mut c = Collection::new(10);
        c.replace_with_search(vec![item(4, "d")]);
        assert_eq!(ids(&c), vec![4]);
        assert!(!c.cursor.has_more);
        assert!(!c.can_load_more());
    }

    #[test]
    fn test_prepend_replace_remove() {
        let mut c = Collection::new(10);
        c.items = vec![item(1, "a"), item(2, "b")];
        c.select(item(2, "b"));

        c.prepend(item(3, "c"));
        assert_eq!(ids(&c), vec![3, 1, 2]);

        c.replace(item(2, "b2"));
        assert_eq!(c.find(&2).map(|i| i.label), Some("b2"));
        assert_eq!(c.selected.as_ref().map(|i| i.label), Some("b2"));
        assert_eq!(c.items.len(), 3);

        // Unknown id leaves the cache untouched
        c.replace(item(7, "x"));
        assert_eq!(ids(&c), vec![3, 1, 2]);

        c.remove(&2);
        assert_eq!(ids(&c), vec![3, 1]);
        assert!(c.selected.is_none());
    }

    #[test]
    fn test_phases() {
        let mut c: Collection<Item> = Collection::new(10);
        c.error = Some("stale".to_string());

        c.apply(Phase::<()>::Pending, "Failed", |_, ()| {});
        assert!(c.is_loading());
        assert!(c.error.is_none());

        c.apply(Phase::<()>::Rejected(String::new()), "Failed to fetch items", |_, ()| {});
        assert_eq!(c.status, RequestStatus::Failed);
        assert_eq!(c.error.as_deref(), Some("Failed to fetch items"));

        c.apply(Phase::Fulfilled(item(1, "a")), "Failed", Collection::prepend);
        assert_eq!(c.status, RequestStatus::Succeeded);
        assert_eq!(ids(&c), vec![1]);
    }

    #[test]
    fn test_tickets_and_reset() {
        let mut c: Collection<Item> = Collection::new(5);
        let first = c.issue_ticket();
        let second = c.issue_ticket();
        assert!(!c.is_current(first));
        assert!(c.is_current(second));

        c.status = RequestStatus::Loading;
        c.items = vec![item(1, "a")];
        c.cursor.offset = 15;
        c.reset();

        assert!(!c.is_current(second));
        assert!(c.items.is_empty());
        assert_eq!(c.cursor, Cursor::start(5));
        assert_eq!(c.status, RequestStatus::Idle);
    }
}

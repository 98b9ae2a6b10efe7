//! Products slice.

use catalog_admin_core::{CategoryId, Page, Product, ProductId};
use tracing::debug;

use super::Phase;
use super::collection::{Collection, Ticket};

/// Products slice actions.
#[derive(Debug, Clone)]
pub enum ProductsAction {
    /// Paginated list fetch.
    Fetch {
        ticket: Ticket,
        phase: Phase<Page<Product>>,
    },
    /// Name search.
    Search {
        ticket: Ticket,
        phase: Phase<Vec<Product>>,
    },
    /// Single product lookup by id or slug.
    Get(Phase<Product>),
    /// Product creation.
    Create(Phase<Product>),
    /// Product update.
    Update(Phase<Product>),
    /// Product deletion, fulfilled with the deleted id.
    Delete(Phase<ProductId>),
    /// Record the search box contents.
    SetSearchQuery(String),
    /// Restrict listing to one category, or lift the restriction.
    SetCategoryFilter(Option<CategoryId>),
    /// Close the detail view.
    ClearSelected,
    /// Empty the cache and rewind pagination.
    Reset,
}

impl ProductsAction {
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "products/fetch",
            Self::Search { .. } => "products/search",
            Self::Get(_) => "products/get",
            Self::Create(_) => "products/create",
            Self::Update(_) => "products/update",
            Self::Delete(_) => "products/delete",
            Self::SetSearchQuery(_) => "products/setSearchQuery",
            Self::SetCategoryFilter(_) => "products/setCategoryFilter",
            Self::ClearSelected => "products/clearSelected",
            Self::Reset => "products/reset",
        }
    }

    pub(crate) const fn phase(&self) -> Option<&'static str> {
        match self {
            Self::Fetch { phase, .. } => Some(phase.label()),
            Self::Search { phase, .. } => Some(phase.label()),
            Self::Get(phase) | Self::Create(phase) | Self::Update(phase) => Some(phase.label()),
            Self::Delete(phase) => Some(phase.label()),
            Self::SetSearchQuery(_)
            | Self::SetCategoryFilter(_)
            | Self::ClearSelected
            | Self::Reset => None,
        }
    }
}

/// Listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    /// Only list products in this category.
    pub category_id: Option<CategoryId>,
    /// Current search box contents.
    pub search_query: String,
}

/// Cached products.
#[derive(Debug, Clone)]
pub struct ProductsState {
    /// Product list, selection and request status.
    pub list: Collection<Product>,
    /// Active filters.
    pub filters: ProductFilters,
}

impl ProductsState {
    /// Empty slice paging `limit` products at a time.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            list: Collection::new(limit),
            filters: ProductFilters {
                category_id: None,
                search_query: String::new(),
            },
        }
    }

    /// Apply an action. Returns `false` when the action changed nothing
    /// (a stale list response, or a filter that was already set).
    pub fn reduce(&mut self, action: ProductsAction) -> bool {
        match action {
            ProductsAction::Fetch { ticket, phase } => {
                if !self.list.is_current(ticket) {
                    debug!(%ticket, "Discarding stale product list response");
                    return false;
                }
                self.list
                    .apply(phase, "Failed to fetch products", Collection::merge_page);
            }
            ProductsAction::Search { ticket, phase } => {
                if !self.list.is_current(ticket) {
                    debug!(%ticket, "Discarding stale product search response");
                    return false;
                }
                self.list.apply(
                    phase,
                    "Failed to search products",
                    Collection::replace_with_search,
                );
            }
            ProductsAction::Get(phase) => {
                self.list
                    .apply(phase, "Failed to fetch product", Collection::select);
            }
            ProductsAction::Create(phase) => {
                self.list
                    .apply(phase, "Failed to create product", Collection::prepend);
            }
            ProductsAction::Update(phase) => {
                self.list
                    .apply(phase, "Failed to update product", Collection::replace);
            }
            ProductsAction::Delete(phase) => {
                self.list
                    .apply(phase, "Failed to delete product", |list, id| list.remove(&id));
            }
            ProductsAction::SetSearchQuery(query) => self.filters.search_query = query,
            ProductsAction::SetCategoryFilter(category_id) => {
                if self.filters.category_id == category_id {
                    return false;
                }
                self.filters.category_id = category_id;
                self.list.reset();
            }
            ProductsAction::ClearSelected => self.list.clear_selected(),
            ProductsAction::Reset => self.list.reset(),
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use catalog_admin_core::{Cursor, Price};

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            slug: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            description: String::new(),
            price: Price::from_cents(1000).unwrap(),
            images: Vec::new(),
            category: None,
            category_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn fetch(state: &mut ProductsState, items: Vec<Product>, offset: u32, limit: u32) {
        let ticket = state.list.issue_ticket();
        state.reduce(ProductsAction::Fetch {
            ticket,
            phase: Phase::Pending,
        });
        state.reduce(ProductsAction::Fetch {
            ticket,
            phase: Phase::Fulfilled(Page::from_items(items, offset, limit)),
        });
    }

    #[test]
    fn test_pagination_example() {
        let mut state = ProductsState::new(2);
        fetch(&mut state, vec![product("1", "A"), product("2", "B")], 0, 2);
        assert_eq!(state.list.items.len(), 2);
        assert!(state.list.cursor.has_more);

        fetch(&mut state, vec![product("3", "C")], 2, 2);
        assert_eq!(state.list.items.len(), 3);
        assert!(!state.list.cursor.has_more);
        assert!(!state.list.is_loading());
    }

    #[test]
    fn test_rejected_leaves_cache() {
        let mut state = ProductsState::new(10);
        fetch(&mut state, vec![product("1", "A")], 0, 10);

        let ticket = state.list.issue_ticket();
        state.reduce(ProductsAction::Fetch {
            ticket,
            phase: Phase::Rejected(String::new()),
        });
        assert_eq!(state.list.items.len(), 1);
        assert_eq!(state.list.error.as_deref(), Some("Failed to fetch products"));
    }

    #[test]
    fn test_reset_retires_in_flight_fetch() {
        let mut state = ProductsState::new(10);
        let ticket = state.list.issue_ticket();
        state.reduce(ProductsAction::Fetch {
            ticket,
            phase: Phase::Pending,
        });

        state.reduce(ProductsAction::Reset);
        assert!(!state.list.is_loading());

        let applied = state.reduce(ProductsAction::Fetch {
            ticket,
            phase: Phase::Fulfilled(Page::from_items(vec![product("1", "A")], 0, 10)),
        });
        assert!(!applied);
        assert!(state.list.items.is_empty());
    }

    #[test]
    fn test_category_filter_resets_list() {
        let mut state = ProductsState::new(10);
        fetch(&mut state, vec![product("1", "A")], 0, 10);

        assert!(state.reduce(ProductsAction::SetCategoryFilter(Some(CategoryId::new("3")))));
        assert!(state.list.items.is_empty());
        assert_eq!(state.list.cursor, Cursor::start(10));
        assert_eq!(state.filters.category_id, Some(CategoryId::new("3")));

        // Same filter again is a no-op
        assert!(!state.reduce(ProductsAction::SetCategoryFilter(Some(CategoryId::new("3")))));
    }

    #[test]
    fn test_update_and_delete_sync_selection() {
        let mut state = ProductsState::new(10);
        fetch(&mut state, vec![product("1", "A"), product("2", "B")], 0, 10);
        state.reduce(ProductsAction::Get(Phase::Fulfilled(product("2", "B"))));

        state.reduce(ProductsAction::Update(Phase::Fulfilled(product("2", "B Prime"))));
        assert_eq!(state.list.items.get(1).unwrap().name, "B Prime");
        assert_eq!(state.list.selected.as_ref().unwrap().name, "B Prime");

        state.reduce(ProductsAction::Delete(Phase::Fulfilled(ProductId::new("2"))));
        assert_eq!(state.list.items.len(), 1);
        assert!(state.list.selected.is_none());

        state.reduce(ProductsAction::Get(Phase::Fulfilled(product("1", "A"))));
        state.reduce(ProductsAction::ClearSelected);
        assert!(state.list.selected.is_none());
    }
}

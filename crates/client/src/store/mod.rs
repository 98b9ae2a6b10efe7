//! Application state and the single dispatch point that mutates it.
//!
//! State is split into slices (auth, categories, products). Each async
//! operation reaches its slice as a sequence of actions carrying a
//! [`Phase`]: `Pending` when the request starts, then `Fulfilled` or
//! `Rejected` when it settles. Reducers are synchronous and run under the
//! store's write lock, so every state transition is serialized even though
//! network completions arrive in any order.
//!
//! List requests are tagged with a [`Ticket`]; a response whose ticket is no
//! longer the latest for its collection is dropped instead of overwriting
//! newer results.

mod auth;
mod categories;
mod collection;
mod products;
pub mod selectors;

pub use auth::{AuthAction, AuthState};
pub use categories::{CategoriesAction, CategoriesState};
pub use collection::{Collection, Ticket};
pub use products::{ProductFilters, ProductsAction, ProductsState};

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::trace;

use crate::config::{DEFAULT_CATEGORIES_PAGE_SIZE, DEFAULT_PRODUCTS_PAGE_SIZE};

/// Lifecycle phase of an async operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase<T> {
    /// The request has been issued.
    Pending,
    /// The request succeeded with this payload.
    Fulfilled(T),
    /// The request failed with this message. An empty message is replaced by
    /// the slice's default for the operation.
    Rejected(String),
}

impl<T> Phase<T> {
    /// Short name used in logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled(_) => "fulfilled",
            Self::Rejected(_) => "rejected",
        }
    }
}

/// Any action, routed to its slice by [`AppState::reduce`].
#[derive(Debug, Clone)]
pub enum Action {
    Auth(AuthAction),
    Categories(CategoriesAction),
    Products(ProductsAction),
}

impl Action {
    const fn name(&self) -> &'static str {
        match self {
            Self::Auth(a) => a.name(),
            Self::Categories(a) => a.name(),
            Self::Products(a) => a.name(),
        }
    }

    const fn phase(&self) -> Option<&'static str> {
        match self {
            Self::Auth(a) => a.phase(),
            Self::Categories(a) => a.phase(),
            Self::Products(a) => a.phase(),
        }
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

impl From<CategoriesAction> for Action {
    fn from(action: CategoriesAction) -> Self {
        Self::Categories(action)
    }
}

impl From<ProductsAction> for Action {
    fn from(action: ProductsAction) -> Self {
        Self::Products(action)
    }
}

/// Which cached list a ticket is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Categories,
    Products,
}

/// The whole client-side cache.
#[derive(Debug, Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub categories: CategoriesState,
    pub products: ProductsState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_PRODUCTS_PAGE_SIZE, DEFAULT_CATEGORIES_PAGE_SIZE)
    }
}

impl AppState {
    /// Empty state with the given page sizes.
    #[must_use]
    pub fn new(products_page_size: u32, categories_page_size: u32) -> Self {
        Self {
            auth: AuthState::default(),
            categories: CategoriesState::new(categories_page_size),
            products: ProductsState::new(products_page_size),
        }
    }

    /// Route an action to its slice. Returns `false` if the slice ignored it.
    pub fn reduce(&mut self, action: Action) -> bool {
        match action {
            Action::Auth(a) => self.auth.reduce(a),
            Action::Categories(a) => self.categories.reduce(a),
            Action::Products(a) => self.products.reduce(a),
        }
    }

    fn issue_ticket(&mut self, resource: Resource) -> Ticket {
        match resource {
            Resource::Categories => self.categories.list.issue_ticket(),
            Resource::Products => self.products.list.issue_ticket(),
        }
    }
}

/// Shared handle to [`AppState`].
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<RwLock<AppState>>,
}

impl Store {
    /// Wrap an initial state.
    #[must_use]
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Apply an action. Returns `false` if the action was ignored, e.g. a
    /// stale list response.
    pub async fn dispatch(&self, action: impl Into<Action>) -> bool {
        let action = action.into();
        let (name, phase) = (action.name(), action.phase());

        let applied = self.state.write().await.reduce(action);
        trace!(action = name, phase = phase.unwrap_or("-"), applied, "dispatch");
        applied
    }

    /// Issue a ticket for a new list request on `resource`.
    pub async fn issue_ticket(&self, resource: Resource) -> Ticket {
        self.state.write().await.issue_ticket(resource)
    }

    /// Read access to the current state. Do not hold across `.await`.
    pub async fn read(&self) -> RwLockReadGuard<'_, AppState> {
        self.state.read().await
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    /// The current bearer token, if logged in.
    pub async fn token(&self) -> Option<SecretString> {
        self.state.read().await.auth.token.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use catalog_admin_core::{Category, CategoryId, Page};

    fn category(id: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: format!("Category {id}"),
            description: None,
            image: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_dispatch_routes_to_slice() {
        let store = Store::default();
        let ticket = store.issue_ticket(Resource::Categories).await;

        assert!(
            store
                .dispatch(CategoriesAction::Fetch {
                    ticket,
                    phase: Phase::Fulfilled(Page::from_items(vec![category("1")], 0, 50)),
                })
                .await
        );

        let state = store.snapshot().await;
        assert_eq!(state.categories.list.items.len(), 1);
        assert!(state.products.list.items.is_empty());
    }

    #[tokio::test]
    async fn test_tickets_are_per_resource() {
        let store = Store::default();
        let products = store.issue_ticket(Resource::Products).await;
        let categories = store.issue_ticket(Resource::Categories).await;
        assert_eq!(products.get(), 1);
        assert_eq!(categories.get(), 1);
        store.issue_ticket(Resource::Products).await;

        let state = store.read().await;
        assert!(!state.products.list.is_current(products));
        assert!(state.categories.list.is_current(categories));
    }

    #[test]
    fn test_default_page_sizes() {
        let state = AppState::default();
        assert_eq!(state.products.list.cursor.limit, 10);
        assert_eq!(state.categories.list.cursor.limit, 50);
    }

    #[test]
    fn test_phase_label() {
        assert_eq!(Phase::<()>::Pending.label(), "pending");
        assert_eq!(Phase::Fulfilled(1).label(), "fulfilled");
        assert_eq!(Phase::<()>::Rejected(String::new()).label(), "rejected");
    }
}

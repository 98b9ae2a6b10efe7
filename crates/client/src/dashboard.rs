//! Async operations that drive the store.
//!
//! Every operation follows the same shape: read the token from state,
//! dispatch `Pending`, perform the API call, then dispatch `Fulfilled` with
//! the payload or `Rejected` with the error message. Failures are both
//! recorded in the slice (for rendering) and returned (for control flow).

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use catalog_admin_core::validation::{CategoryForm, ProductForm};
use catalog_admin_core::{Category, CategoryId, Email, Product, ProductId, ProductRef};
use tracing::{debug, info, instrument, warn};

use crate::api::AuthGrant;
use crate::config::{ClientConfig, DEFAULT_SEARCH_DEBOUNCE_MS};
use crate::error::{ApiError, ClientError};
use crate::guard::{self, Guard};
use crate::http::ApiClient;
use crate::session::{FileSessionStorage, SessionStorage, StoredSession};
use crate::store::selectors::{self, DashboardStats};
use crate::store::{
    Action, AppState, AuthAction, CategoriesAction, Phase, ProductsAction, Resource, Store, Ticket,
};

/// Products requested for the dashboard overview.
pub const OVERVIEW_PRODUCT_LIMIT: u32 = 1000;

/// Client facade: store, API client and session storage.
#[derive(Clone)]
pub struct Dashboard {
    store: Store,
    api: ApiClient,
    session: Arc<dyn SessionStorage>,
    search_debounce: Duration,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("api", &self.api)
            .field("search_debounce", &self.search_debounce)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    /// Assemble a dashboard from its parts.
    #[must_use]
    pub fn new(api: ApiClient, session: Arc<dyn SessionStorage>, state: AppState) -> Self {
        Self {
            store: Store::new(state),
            api,
            session,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }

    /// Build a dashboard with file-backed session storage.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let api = ApiClient::from_config(config)?;
        let session = Arc::new(FileSessionStorage::new(&config.session_file));
        let state = AppState::new(config.products_page_size, config.categories_page_size);
        Ok(Self::new(api, session, state).with_search_debounce(config.search_debounce))
    }

    /// Override the search debounce delay.
    #[must_use]
    pub const fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search_debounce = delay;
        self
    }

    /// The shared store.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// The API client.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Delay between the last search keystroke and the request.
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        self.search_debounce
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Load the persisted session into state, once.
    ///
    /// Unreadable storage is logged and treated as "no session"; either way
    /// the auth slice ends up hydrated. Returns whether a session is active.
    pub async fn hydrate(&self) -> bool {
        if !self.store.read().await.auth.hydrated {
            let stored = self.session.load().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring unreadable session");
                None
            });
            self.store.dispatch(AuthAction::Hydrate(stored)).await;
        }
        self.store.read().await.auth.is_authenticated
    }

    /// Where a protected view should go given the current auth state.
    pub async fn guard(&self) -> Guard {
        guard::evaluate(&self.store.read().await.auth)
    }

    /// Verify `email` and start a session.
    ///
    /// The email is validated before any request is sent. On success the
    /// token and email are persisted before the session becomes active; on
    /// failure any stored session is wiped.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEmail`] for malformed input, the API
    /// error if verification fails, or a session error if the token cannot
    /// be persisted. In both failure cases the state stays logged out.
    #[instrument(skip(self))]
    pub async fn login(&self, email: &str) -> Result<AuthGrant, ClientError> {
        let email = Email::parse(email)?;

        self.store.dispatch(AuthAction::Verify(Phase::Pending)).await;
        match self.api.auth().verify(&email).await {
            Ok(grant) => {
                let stored = StoredSession {
                    token: grant.token.clone(),
                    email: Some(grant.email.clone()),
                };
                if let Err(e) = self.session.save(&stored) {
                    self.store
                        .dispatch(AuthAction::Verify(Phase::Rejected(e.to_string())))
                        .await;
                    return Err(e.into());
                }
                self.store
                    .dispatch(AuthAction::Verify(Phase::Fulfilled(grant.clone())))
                    .await;
                info!("Logged in");
                Ok(grant)
            }
            Err(e) => {
                self.store
                    .dispatch(AuthAction::Verify(Phase::Rejected(e.to_string())))
                    .await;
                if let Err(clear_err) = self.session.clear() {
                    warn!(error = %clear_err, "Failed to clear stored session");
                }
                Err(e.into())
            }
        }
    }

    /// End the session and wipe stored credentials.
    ///
    /// # Errors
    ///
    /// Returns a session error if storage cannot be cleared; state is
    /// logged out regardless.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.store.dispatch(AuthAction::Logout).await;
        self.session.clear()?;
        info!("Logged out");
        Ok(())
    }

    /// Dismiss the last login error.
    pub async fn clear_auth_error(&self) {
        self.store.dispatch(AuthAction::ClearError).await;
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Fetch one page of categories. Offset 0 replaces the cache.
    ///
    /// # Errors
    ///
    /// Returns the API error, or [`ClientError::Superseded`] if a newer list
    /// request finished first.
    pub async fn fetch_categories(&self, offset: u32, limit: u32) -> Result<(), ClientError> {
        let token = self.store.token().await;
        let request = self.api.categories().list(offset, limit, token.as_ref());
        self.run_list(
            Resource::Categories,
            |ticket, phase| CategoriesAction::Fetch { ticket, phase }.into(),
            request,
        )
        .await
    }

    /// Search categories by name, replacing the cache and stopping pagination.
    ///
    /// # Errors
    ///
    /// See [`Dashboard::fetch_categories`].
    pub async fn search_categories(&self, text: &str) -> Result<(), ClientError> {
        let token = self.store.token().await;
        let request = self.api.categories().search(text, token.as_ref());
        self.run_list(
            Resource::Categories,
            |ticket, phase| CategoriesAction::Search { ticket, phase }.into(),
            request,
        )
        .await
    }

    /// Fetch one category and select it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] (wrapped) when absent.
    pub async fn get_category(&self, id: &CategoryId) -> Result<Category, ClientError> {
        let token = self.store.token().await;
        let request = self.api.categories().get(id, token.as_ref());
        self.run(|phase| CategoriesAction::Get(phase).into(), request)
            .await
    }

    /// Validate and create a category; it is prepended to the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without any request when the form
    /// is invalid, otherwise the API error.
    pub async fn create_category(&self, form: &CategoryForm) -> Result<Category, ClientError> {
        let input = form.validate()?;
        let token = self.store.token().await;
        let request = self.api.categories().create(&input, token.as_ref());
        self.run(|phase| CategoriesAction::Create(phase).into(), request)
            .await
    }

    /// Validate and update a category in place.
    ///
    /// # Errors
    ///
    /// See [`Dashboard::create_category`].
    pub async fn update_category(
        &self,
        id: &CategoryId,
        form: &CategoryForm,
    ) -> Result<Category, ClientError> {
        let input = form.validate()?;
        let token = self.store.token().await;
        let request = self.api.categories().update(id, &input, token.as_ref());
        self.run(|phase| CategoriesAction::Update(phase).into(), request)
            .await
    }

    /// Delete a category and drop it from the cache.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), ClientError> {
        let token = self.store.token().await;
        let id = id.clone();
        let request = async {
            self.api.categories().delete(&id, token.as_ref()).await?;
            Ok::<_, ApiError>(id.clone())
        };
        self.run(|phase| CategoriesAction::Delete(phase).into(), request)
            .await
            .map(drop)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch one page of products, optionally within a category. Offset 0
    /// replaces the cache.
    ///
    /// # Errors
    ///
    /// Returns the API error, or [`ClientError::Superseded`] if a newer list
    /// request finished first.
    pub async fn fetch_products(
        &self,
        offset: u32,
        limit: u32,
        category_id: Option<&CategoryId>,
    ) -> Result<(), ClientError> {
        let token = self.store.token().await;
        let request = self
            .api
            .products()
            .list(offset, limit, category_id, token.as_ref());
        self.run_list(
            Resource::Products,
            |ticket, phase| ProductsAction::Fetch { ticket, phase }.into(),
            request,
        )
        .await
    }

    /// Search products by name, replacing the cache and stopping pagination.
    ///
    /// # Errors
    ///
    /// See [`Dashboard::fetch_products`].
    pub async fn search_products(&self, text: &str) -> Result<(), ClientError> {
        let token = self.store.token().await;
        let request = self.api.products().search(text, token.as_ref());
        self.run_list(
            Resource::Products,
            |ticket, phase| ProductsAction::Search { ticket, phase }.into(),
            request,
        )
        .await
    }

    /// Fetch one product by id or slug and select it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] (wrapped) when absent.
    pub async fn get_product(&self, product: &ProductRef) -> Result<Product, ClientError> {
        let token = self.store.token().await;
        let request = self.api.products().get(product, token.as_ref());
        self.run(|phase| ProductsAction::Get(phase).into(), request)
            .await
    }

    /// Validate and create a product; it is prepended to the cache.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without any request when the form
    /// is invalid, otherwise the API error.
    pub async fn create_product(&self, form: &ProductForm) -> Result<Product, ClientError> {
        let input = form.validate()?;
        let token = self.store.token().await;
        let request = self.api.products().create(&input, token.as_ref());
        self.run(|phase| ProductsAction::Create(phase).into(), request)
            .await
    }

    /// Validate and update a product in place.
    ///
    /// # Errors
    ///
    /// See [`Dashboard::create_product`].
    pub async fn update_product(
        &self,
        id: &ProductId,
        form: &ProductForm,
    ) -> Result<Product, ClientError> {
        let input = form.validate()?;
        let token = self.store.token().await;
        let request = self.api.products().update(id, &input, token.as_ref());
        self.run(|phase| ProductsAction::Update(phase).into(), request)
            .await
    }

    /// Delete a product and drop it from the cache.
    ///
    /// # Errors
    ///
    /// Returns the API error.
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ClientError> {
        let token = self.store.token().await;
        let id = id.clone();
        let request = async {
            self.api.products().delete(&id, token.as_ref()).await?;
            Ok::<_, ApiError>(id.clone())
        };
        self.run(|phase| ProductsAction::Delete(phase).into(), request)
            .await
            .map(drop)
    }

    /// Change the category filter and reload the first page.
    ///
    /// # Errors
    ///
    /// See [`Dashboard::fetch_products`].
    pub async fn filter_products(&self, category_id: Option<CategoryId>) -> Result<(), ClientError> {
        self.store
            .dispatch(ProductsAction::SetCategoryFilter(category_id))
            .await;
        self.reload(Resource::Products).await
    }

    // =========================================================================
    // Shared list operations
    // =========================================================================

    /// Run a name search on `resource`.
    ///
    /// # Errors
    ///
    /// See [`Dashboard::fetch_products`].
    pub async fn search(&self, resource: Resource, text: &str) -> Result<(), ClientError> {
        match resource {
            Resource::Categories => self.search_categories(text).await,
            Resource::Products => self.search_products(text).await,
        }
    }

    /// Record the search box contents for `resource`.
    pub async fn set_search_query(&self, resource: Resource, query: &str) {
        let query = query.to_string();
        let action: Action = match resource {
            Resource::Categories => CategoriesAction::SetSearchQuery(query).into(),
            Resource::Products => ProductsAction::SetSearchQuery(query).into(),
        };
        self.store.dispatch(action).await;
    }

    /// Leave search mode: empty the cache and load the first page again,
    /// keeping the product category filter.
    ///
    /// # Errors
    ///
    /// See [`Dashboard::fetch_products`].
    pub async fn exit_search(&self, resource: Resource) -> Result<(), ClientError> {
        self.reload(resource).await
    }

    /// Fetch the page after the cursor.
    ///
    /// Does nothing (and returns `false`) when there is no further page or a
    /// request is already in flight.
    ///
    /// # Errors
    ///
    /// See [`Dashboard::fetch_products`].
    pub async fn load_more(&self, resource: Resource) -> Result<bool, ClientError> {
        let (cursor, category_id) = {
            let state = self.store.read().await;
            match resource {
                Resource::Categories => {
                    let list = &state.categories.list;
                    if !list.can_load_more() {
                        return Ok(false);
                    }
                    (list.cursor, None)
                }
                Resource::Products => {
                    let list = &state.products.list;
                    if !list.can_load_more() {
                        return Ok(false);
                    }
                    (list.cursor, state.products.filters.category_id.clone())
                }
            }
        };

        debug!(?resource, offset = cursor.next_offset(), "Loading next page");
        match resource {
            Resource::Categories => {
                self.fetch_categories(cursor.next_offset(), cursor.limit)
                    .await?;
            }
            Resource::Products => {
                self.fetch_products(cursor.next_offset(), cursor.limit, category_id.as_ref())
                    .await?;
            }
        }
        Ok(true)
    }

    /// Fetch products and categories together and summarize them.
    ///
    /// # Errors
    ///
    /// Returns the first failing request's error.
    pub async fn overview(&self) -> Result<DashboardStats, ClientError> {
        let categories_limit = self.store.read().await.categories.list.cursor.limit;
        let (products, categories) = tokio::join!(
            self.fetch_products(0, OVERVIEW_PRODUCT_LIMIT, None),
            self.fetch_categories(0, categories_limit),
        );
        products?;
        categories?;
        Ok(selectors::dashboard_stats(&*self.store.read().await))
    }

    /// Reset a list and fetch its first page with the current filters.
    async fn reload(&self, resource: Resource) -> Result<(), ClientError> {
        match resource {
            Resource::Categories => {
                self.store.dispatch(CategoriesAction::Reset).await;
                let limit = self.store.read().await.categories.list.cursor.limit;
                self.fetch_categories(0, limit).await
            }
            Resource::Products => {
                self.store.dispatch(ProductsAction::Reset).await;
                let (limit, category_id) = {
                    let state = self.store.read().await;
                    (
                        state.products.list.cursor.limit,
                        state.products.filters.category_id.clone(),
                    )
                };
                self.fetch_products(0, limit, category_id.as_ref()).await
            }
        }
    }

    // =========================================================================
    // Thunk plumbing
    // =========================================================================

    /// Drive a ticketed list request through its phases.
    async fn run_list<P>(
        &self,
        resource: Resource,
        action: impl Fn(Ticket, Phase<P>) -> Action,
        request: impl Future<Output = Result<P, ApiError>>,
    ) -> Result<(), ClientError> {
        let ticket = self.store.issue_ticket(resource).await;
        self.store.dispatch(action(ticket, Phase::Pending)).await;

        match request.await {
            Ok(payload) => {
                if self.store.dispatch(action(ticket, Phase::Fulfilled(payload))).await {
                    Ok(())
                } else {
                    Err(ClientError::Superseded)
                }
            }
            Err(e) => {
                self.store
                    .dispatch(action(ticket, Phase::Rejected(e.to_string())))
                    .await;
                Err(e.into())
            }
        }
    }

    /// Drive a single-item request through its phases.
    async fn run<P: Clone>(
        &self,
        action: impl Fn(Phase<P>) -> Action,
        request: impl Future<Output = Result<P, ApiError>>,
    ) -> Result<P, ClientError> {
        self.store.dispatch(action(Phase::Pending)).await;

        match request.await {
            Ok(payload) => {
                self.store
                    .dispatch(action(Phase::Fulfilled(payload.clone())))
                    .await;
                Ok(payload)
            }
            Err(e) => {
                self.store
                    .dispatch(action(Phase::Rejected(e.to_string())))
                    .await;
                Err(e.into())
            }
        }
    }
}

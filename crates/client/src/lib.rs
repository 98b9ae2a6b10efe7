//! Catalog Admin client library.
//!
//! Talks to the catalog REST API and keeps a client-side cache of the
//! session, categories and products in Redux-style slices.
//!
//! # Modules
//!
//! - [`config`]: environment-driven configuration
//! - [`http`]: JSON request wrapper with bearer auth and error normalization
//! - [`api`]: auth, category and product endpoints
//! - [`store`]: application state, actions, reducers and selectors
//! - [`dashboard`]: async operations that call the API and update the store
//! - [`session`]: persisted login session
//! - [`search`]: debounced search input
//! - [`guard`]: access decision for protected views
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_admin_client::{ClientConfig, Dashboard, Guard};
//!
//! let config = ClientConfig::from_env()?;
//! let dashboard = Dashboard::from_config(&config)?;
//!
//! dashboard.hydrate().await;
//! if dashboard.guard().await == Guard::Allow {
//!     dashboard.fetch_products(0, config.products_page_size, None).await?;
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod guard;
pub mod http;
pub mod search;
pub mod session;
pub mod store;

pub use config::{ClientConfig, ConfigError};
pub use dashboard::Dashboard;
pub use error::{ApiError, ClientError, SessionError};
pub use guard::Guard;
pub use http::ApiClient;
pub use search::{Debouncer, SearchBox};
pub use session::{FileSessionStorage, MemorySessionStorage, SessionStorage, StoredSession};
pub use store::{AppState, Resource, Store};

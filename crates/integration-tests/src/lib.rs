//! Integration tests for Catalog Admin.
//!
//! Each test drives a [`Dashboard`] built from a [`ClientConfig`] against a
//! `wiremock` server standing in for the catalog REST API, with the session
//! file in a temporary directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-admin-integration-tests
//! ```
//!
//! # Test Files
//!
//! - `auth` - login, session persistence, bearer headers
//! - `catalog_crud` - pagination, create/update/delete cache updates, validation
//! - `search` - debounced search and stale response handling

use std::time::Duration;

use catalog_admin_client::{
    ClientConfig, Dashboard, FileSessionStorage, SessionStorage, StoredSession,
};
use catalog_admin_core::Email;
use secrecy::SecretString;
use serde_json::{Value, json};
use tempfile::TempDir;
use url::Url;
use wiremock::MockServer;

/// Token used by [`TestContext::signed_in`].
pub const TEST_TOKEN: &str = "test-token-123";

/// Email used by [`TestContext::signed_in`].
pub const TEST_EMAIL: &str = "admin@example.com";

/// A mock API server plus a config pointing at it.
pub struct TestContext {
    pub server: MockServer,
    pub config: ClientConfig,
    _dir: TempDir,
}

impl TestContext {
    /// Start a mock server with small page sizes and a short debounce.
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = ClientConfig::new(
            Url::parse(&server.uri()).expect("Mock server URI should parse"),
        )
        .with_session_file(dir.path().join("session.json"))
        .with_search_debounce(Duration::from_millis(50));
        config.products_page_size = 2;
        config.categories_page_size = 2;

        Self {
            server,
            config,
            _dir: dir,
        }
    }

    /// A fresh dashboard over the shared config and session file.
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::from_config(&self.config).expect("Failed to build dashboard")
    }

    /// Persist a session and return a hydrated dashboard that uses it.
    pub async fn signed_in(&self) -> Dashboard {
        FileSessionStorage::new(&self.config.session_file)
            .save(&StoredSession {
                token: SecretString::from(TEST_TOKEN.to_string()),
                email: Some(Email::parse(TEST_EMAIL).expect("Test email should parse")),
            })
            .expect("Failed to write session file");

        let dashboard = self.dashboard();
        assert!(dashboard.hydrate().await, "Stored session should hydrate");
        dashboard
    }

    /// Every request the mock server saw on `path`.
    pub async fn requests_to(&self, path: &str) -> Vec<wiremock::Request> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == path)
            .collect()
    }
}

/// A category as the API returns it.
pub fn category_json(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("All about {name}"),
        "image": format!("https://cdn.example.com/categories/{id}.jpg"),
        "createdAt": "2025-01-01T00:00:00Z"
    })
}

/// A product as the API returns it, with an embedded category.
pub fn product_json(id: u32, name: &str, price: f64, category_id: u32) -> Value {
    json!({
        "id": id,
        "slug": name.to_lowercase().replace(' ', "-"),
        "title": name,
        "description": format!("{name} for integration tests"),
        "price": price,
        "images": [format!("https://cdn.example.com/products/{id}.jpg")],
        "category": {"id": category_id, "name": format!("Category {category_id}")},
        "createdAt": format!("2025-01-{:02}T00:00:00Z", id.clamp(1, 28))
    })
}

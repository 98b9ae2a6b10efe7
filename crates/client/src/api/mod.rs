//! Resource APIs mapping catalog operations onto REST calls.
//!
//! Each API borrows the shared [`ApiClient`](crate::http::ApiClient) and takes
//! the bearer token per call, so one client serves both anonymous (login)
//! and authenticated requests.

mod auth;
mod categories;
mod products;

pub use auth::{AuthApi, AuthGrant};
pub use categories::CategoriesApi;
pub use products::ProductsApi;

use url::form_urlencoded;

use crate::http::ApiClient;

impl ApiClient {
    /// Authentication endpoints.
    #[must_use]
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Category endpoints.
    #[must_use]
    pub const fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self)
    }

    /// Product endpoints.
    #[must_use]
    pub const fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(self)
    }
}

/// Append URL-encoded query parameters to an endpoint path.
fn with_query<'a>(path: &str, params: impl IntoIterator<Item = (&'a str, String)>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        query.append_pair(key, &value);
    }
    let query = query.finish();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// `{collection}/{segment}` with `segment` percent-encoded, so ids and slugs
/// containing `/`, `?` or `#` stay one path segment.
fn item_path(collection: &str, segment: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(segment.as_bytes()).collect();
    // byte_serialize writes spaces as `+`; a literal `+` is already `%2B`
    format!("{collection}/{}", encoded.replace('+', "%20"))
}

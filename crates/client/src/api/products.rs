//! Product endpoints.

use catalog_admin_core::{CategoryId, Page, Product, ProductId, ProductInput, ProductRef};
use secrecy::SecretString;
use serde::de::IgnoredAny;
use tracing::{debug, instrument};

use super::{item_path, with_query};
use crate::error::ApiError;
use crate::http::ApiClient;

/// Product API.
#[derive(Debug, Clone, Copy)]
pub struct ProductsApi<'a> {
    http: &'a ApiClient,
}

impl<'a> ProductsApi<'a> {
    pub(crate) const fn new(http: &'a ApiClient) -> Self {
        Self { http }
    }

    /// `GET /products?offset&limit[&categoryId]`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list(
        self,
        offset: u32,
        limit: u32,
        category_id: Option<&CategoryId>,
        token: Option<&SecretString>,
    ) -> Result<Page<Product>, ApiError> {
        let mut params = vec![("offset", offset.to_string()), ("limit", limit.to_string())];
        if let Some(category_id) = category_id {
            params.push(("categoryId", category_id.to_string()));
        }

        let items: Vec<Product> = self.http.get(&with_query("/products", params), token).await?;
        debug!(count = items.len(), "Fetched products");
        Ok(Page::from_items(items, offset, limit))
    }

    /// `GET /products/search?searchedText`. Results are not paginated.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, token))]
    pub async fn search(
        self,
        text: &str,
        token: Option<&SecretString>,
    ) -> Result<Vec<Product>, ApiError> {
        let endpoint = with_query("/products/search", [("searchedText", text.to_string())]);
        self.http.get(&endpoint, token).await
    }

    /// `GET /products/:idOrSlug`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no product matches.
    #[instrument(skip(self, token), fields(product = %product))]
    pub async fn get(
        self,
        product: &ProductRef,
        token: Option<&SecretString>,
    ) -> Result<Product, ApiError> {
        self.http
            .get(&item_path("/products", product.as_path_segment()), token)
            .await
    }

    /// `POST /products`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the server rejects the input.
    #[instrument(skip(self, input, token), fields(name = %input.name))]
    pub async fn create(
        self,
        input: &ProductInput,
        token: Option<&SecretString>,
    ) -> Result<Product, ApiError> {
        self.http.post("/products", input, token).await
    }

    /// `PUT /products/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the server rejects the input.
    #[instrument(skip(self, input, token), fields(id = %id))]
    pub async fn update(
        self,
        id: &ProductId,
        input: &ProductInput,
        token: Option<&SecretString>,
    ) -> Result<Product, ApiError> {
        self.http.put(&item_path("/products", id.as_str()), input, token).await
    }

    /// `DELETE /products/:id`. Any response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn delete(self, id: &ProductId, token: Option<&SecretString>) -> Result<(), ApiError> {
        let _: IgnoredAny = self.http.delete(&item_path("/products", id.as_str()), token).await?;
        Ok(())
    }
}

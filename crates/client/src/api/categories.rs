//! Category endpoints.

use catalog_admin_core::{Category, CategoryId, CategoryInput, Page};
use secrecy::SecretString;
use serde::de::IgnoredAny;
use tracing::{debug, instrument};

use super::{item_path, with_query};
use crate::error::ApiError;
use crate::http::ApiClient;

/// Category API.
#[derive(Debug, Clone, Copy)]
pub struct CategoriesApi<'a> {
    http: &'a ApiClient,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) const fn new(http: &'a ApiClient) -> Self {
        Self { http }
    }

    /// `GET /categories?offset&limit`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, token))]
    pub async fn list(
        self,
        offset: u32,
        limit: u32,
        token: Option<&SecretString>,
    ) -> Result<Page<Category>, ApiError> {
        let endpoint = with_query(
            "/categories",
            [("offset", offset.to_string()), ("limit", limit.to_string())],
        );
        let items: Vec<Category> = self.http.get(&endpoint, token).await?;
        debug!(count = items.len(), "Fetched categories");
        Ok(Page::from_items(items, offset, limit))
    }

    /// `GET /categories/search?searchedText`. Results are not paginated.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, token))]
    pub async fn search(
        self,
        text: &str,
        token: Option<&SecretString>,
    ) -> Result<Vec<Category>, ApiError> {
        let endpoint = with_query("/categories/search", [("searchedText", text.to_string())]);
        self.http.get(&endpoint, token).await
    }

    /// `GET /categories/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no such category exists.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn get(
        self,
        id: &CategoryId,
        token: Option<&SecretString>,
    ) -> Result<Category, ApiError> {
        self.http.get(&item_path("/categories", id.as_str()), token).await
    }

    /// `POST /categories`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the server rejects the input.
    #[instrument(skip(self, input, token), fields(name = %input.name))]
    pub async fn create(
        self,
        input: &CategoryInput,
        token: Option<&SecretString>,
    ) -> Result<Category, ApiError> {
        self.http.post("/categories", input, token).await
    }

    /// `PUT /categories/:id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the server rejects the input.
    #[instrument(skip(self, input, token), fields(id = %id))]
    pub async fn update(
        self,
        id: &CategoryId,
        input: &CategoryInput,
        token: Option<&SecretString>,
    ) -> Result<Category, ApiError> {
        self.http
            .put(&item_path("/categories", id.as_str()), input, token)
            .await
    }

    /// `DELETE /categories/:id`. Any response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn delete(self, id: &CategoryId, token: Option<&SecretString>) -> Result<(), ApiError> {
        let _: IgnoredAny = self
            .http
            .delete(&item_path("/categories", id.as_str()), token)
            .await?;
        Ok(())
    }
}

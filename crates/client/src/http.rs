//! JSON-over-HTTP wrapper shared by every resource API.
//!
//! Every call sends `Content-Type: application/json`, attaches
//! `Authorization: Bearer <token>` when a token is given, and turns non-2xx
//! responses into [`ApiError`] carrying the server's `message`.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};

/// HTTP client bound to the API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for `base_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(config.api_url.clone(), config.http_timeout)
    }

    /// The API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Issue a request and decode the JSON response body.
    ///
    /// `endpoint` is appended verbatim to the base URL, so it starts with `/`
    /// and carries its own query string.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or a body
    /// that does not decode into `T`.
    #[instrument(skip(self, method, body, token), fields(method = %method, authenticated = token.is_some()))]
    pub async fn request<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        token: Option<&SecretString>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint)?;

        let mut request = self
            .client
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        debug!(status = %response.status(), "API response");

        handle_response(response).await
    }

    /// `GET endpoint`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: Option<&SecretString>,
    ) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, endpoint, None, token)
            .await
    }

    /// `POST endpoint` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<B, T>(
        &self,
        endpoint: &str,
        data: &B,
        token: Option<&SecretString>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, endpoint, Some(data), token)
            .await
    }

    /// `PUT endpoint` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn put<B, T>(
        &self,
        endpoint: &str,
        data: &B,
        token: Option<&SecretString>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, endpoint, Some(data), token)
            .await
    }

    /// `PATCH endpoint` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn patch<B, T>(
        &self,
        endpoint: &str,
        data: &B,
        token: Option<&SecretString>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, endpoint, Some(data), token)
            .await
    }

    /// `DELETE endpoint`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: Option<&SecretString>,
    ) -> Result<T, ApiError> {
        self.request::<(), T>(Method::DELETE, endpoint, None, token)
            .await
    }

    fn url(&self, endpoint: &str) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{endpoint}"))?)
    }
}

/// Decode a successful response or convert a failed one into an error.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    if response.status().is_success() {
        let body = response.bytes().await?;
        return decode_body(&body);
    }

    Err(parse_error(response).await)
}

/// Parse a JSON body; an empty body decodes as `null`.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let decoded = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(body)
    };
    decoded.map_err(|e| ApiError::Decode(e.to_string()))
}

async fn parse_error(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body, status.canonical_reason());

    warn!(status = status.as_u16(), message = %message, "API request failed");

    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized(message),
        _ => ApiError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// The user-facing message for a failed response.
///
/// A JSON body contributes its `message` field (a string, or an array of
/// strings joined with `", "`). A body that is not JSON falls back to the
/// status text.
fn error_message(body: &str, status_text: Option<&str>) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => message_field(&value).unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
        Err(_) => status_text
            .filter(|text| !text.is_empty())
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_string(),
    }
}

fn message_field(value: &Value) -> Option<String> {
    match value.get("message")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    }
}

//! `POST /auth`: exchange an email for a bearer token.

use catalog_admin_core::Email;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::http::ApiClient;

/// A token issued by the API together with the email it was issued for.
#[derive(Clone)]
pub struct AuthGrant {
    /// Bearer token for subsequent requests.
    pub token: SecretString,
    /// The verified email.
    pub email: Email,
}

impl std::fmt::Debug for AuthGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGrant")
            .field("token", &"[REDACTED]")
            .field("email", &self.email)
            .finish()
    }
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    email: &'a str,
}

#[derive(Deserialize)]
struct VerifyResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    token: String,
}

/// Authentication API.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    http: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) const fn new(http: &'a ApiClient) -> Self {
        Self { http }
    }

    /// Verify an email and obtain a token.
    ///
    /// The API checks the email only; there is no password.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the server rejects the email or the request
    /// fails.
    #[instrument(skip(self, email), fields(email = %email))]
    pub async fn verify(self, email: &Email) -> Result<AuthGrant, ApiError> {
        let response: VerifyResponse = self
            .http
            .post(
                "/auth",
                &VerifyRequest {
                    email: email.as_str(),
                },
                None,
            )
            .await?;

        info!("Email verified");

        Ok(AuthGrant {
            token: SecretString::from(response.token),
            email: email.clone(),
        })
    }
}

//! Authentication slice.

use catalog_admin_core::{Email, RequestStatus};
use secrecy::SecretString;

use super::Phase;
use crate::api::AuthGrant;
use crate::session::StoredSession;

const VERIFY_FAILED: &str = "Authentication failed";

/// Auth slice actions.
#[derive(Debug, Clone)]
pub enum AuthAction {
    /// Email verification lifecycle.
    Verify(Phase<AuthGrant>),
    /// One-time load of the persisted session.
    Hydrate(Option<StoredSession>),
    /// Drop the session.
    Logout,
    /// Dismiss the last error.
    ClearError,
}

impl AuthAction {
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Self::Verify(_) => "auth/verify",
            Self::Hydrate(_) => "auth/hydrate",
            Self::Logout => "auth/logout",
            Self::ClearError => "auth/clearError",
        }
    }

    pub(crate) const fn phase(&self) -> Option<&'static str> {
        match self {
            Self::Verify(phase) => Some(phase.label()),
            _ => None,
        }
    }
}

/// Session state.
///
/// `is_authenticated` implies `token` is set.
#[derive(Clone, Default)]
pub struct AuthState {
    /// Bearer token for authenticated requests.
    pub token: Option<SecretString>,
    /// Email of the logged-in user.
    pub email: Option<Email>,
    /// Whether a session is active.
    pub is_authenticated: bool,
    /// Status of the last verify request.
    pub status: RequestStatus,
    /// Message of the last failed verify.
    pub error: Option<String>,
    /// Whether the persisted session has been loaded.
    pub hydrated: bool,
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("email", &self.email)
            .field("is_authenticated", &self.is_authenticated)
            .field("status", &self.status)
            .field("error", &self.error)
            .field("hydrated", &self.hydrated)
            .finish()
    }
}

impl AuthState {
    /// Whether a verify request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    /// Apply an action. Returns `false` when the action was ignored.
    pub fn reduce(&mut self, action: AuthAction) -> bool {
        match action {
            AuthAction::Verify(Phase::Pending) => {
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            AuthAction::Verify(Phase::Fulfilled(grant)) => {
                self.token = Some(grant.token);
                self.email = Some(grant.email);
                self.is_authenticated = true;
                self.status = RequestStatus::Succeeded;
                self.error = None;
                self.hydrated = true;
            }
            AuthAction::Verify(Phase::Rejected(message)) => {
                self.token = None;
                self.email = None;
                self.is_authenticated = false;
                self.status = RequestStatus::Failed;
                self.error = Some(if message.trim().is_empty() {
                    VERIFY_FAILED.to_string()
                } else {
                    message
                });
            }
            AuthAction::Hydrate(session) => {
                if self.hydrated {
                    return false;
                }
                if let Some(session) = session {
                    self.token = Some(session.token);
                    self.email = session.email;
                    self.is_authenticated = true;
                }
                self.hydrated = true;
            }
            AuthAction::Logout => {
                self.token = None;
                self.email = None;
                self.is_authenticated = false;
                self.status = RequestStatus::Idle;
                self.error = None;
            }
            AuthAction::ClearError => self.error = None,
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn grant() -> AuthGrant {
        AuthGrant {
            token: SecretString::from("tok".to_string()),
            email: Email::parse("admin@example.com").unwrap(),
        }
    }

    #[test]
    fn test_verify_lifecycle() {
        let mut state = AuthState::default();

        state.reduce(AuthAction::Verify(Phase::Pending));
        assert!(state.is_loading());

        state.reduce(AuthAction::Verify(Phase::Fulfilled(grant())));
        assert!(state.is_authenticated);
        assert!(state.hydrated);
        assert_eq!(state.token.as_ref().unwrap().expose_secret(), "tok");
        assert_eq!(state.email.as_ref().unwrap().as_str(), "admin@example.com");
    }

    #[test]
    fn test_verify_rejected_uses_fallback_message() {
        let mut state = AuthState::default();
        state.reduce(AuthAction::Verify(Phase::Fulfilled(grant())));
        state.reduce(AuthAction::Verify(Phase::Rejected(String::new())));

        assert!(!state.is_authenticated);
        assert!(state.token.is_none());
        assert_eq!(state.error.as_deref(), Some("Authentication failed"));
        assert_eq!(state.status, RequestStatus::Failed);
    }

    #[test]
    fn test_hydrate_once() {
        let mut state = AuthState::default();
        assert!(state.reduce(AuthAction::Hydrate(None)));
        assert!(state.hydrated);
        assert!(!state.is_authenticated);

        let session = StoredSession {
            token: SecretString::from("late".to_string()),
            email: None,
        };
        assert!(!state.reduce(AuthAction::Hydrate(Some(session))));
        assert!(state.token.is_none());
    }

    #[test]
    fn test_hydrate_with_session() {
        let mut state = AuthState::default();
        state.reduce(AuthAction::Hydrate(Some(StoredSession {
            token: SecretString::from("stored".to_string()),
            email: Some(Email::parse("ops@example.com").unwrap()),
        })));
        assert!(state.is_authenticated);
        assert_eq!(state.email.unwrap().as_str(), "ops@example.com");
    }

    #[test]
    fn test_logout_and_clear_error() {
        let mut state = AuthState::default();
        state.reduce(AuthAction::Verify(Phase::Fulfilled(grant())));
        state.error = Some("boom".to_string());

        state.reduce(AuthAction::ClearError);
        assert!(state.error.is_none());

        state.reduce(AuthAction::Logout);
        assert!(!state.is_authenticated);
        assert!(state.token.is_none());
        assert!(state.email.is_none());
        // Hydration is a one-time event and survives logout
        assert!(state.hydrated);
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut state = AuthState::default();
        state.reduce(AuthAction::Verify(Phase::Fulfilled(grant())));
        let debug = format!("{state:?}");
        assert!(!debug.contains("\"tok\""));
        assert!(debug.contains("[REDACTED]"));
    }
}

//! Route guard for views that need a session.

use crate::store::AuthState;

/// What a protected view should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Session state is not known yet; show a loading indicator.
    Loading,
    /// No session; send the user to login.
    RedirectToLogin,
    /// Render the view.
    Allow,
}

/// Decide from auth state alone.
///
/// Nothing is allowed before hydration, so no authenticated request can fire
/// before the persisted token has been loaded.
#[must_use]
pub const fn evaluate(auth: &AuthState) -> Guard {
    if !auth.hydrated || auth.is_loading() {
        Guard::Loading
    } else if auth.is_authenticated {
        Guard::Allow
    } else {
        Guard::RedirectToLogin
    }
}

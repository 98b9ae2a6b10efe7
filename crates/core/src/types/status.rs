//! Request lifecycle status shared by every state slice.

use serde::{Deserialize, Serialize};

/// Where a slice's most recent async operation stands.
///
/// Every operation moves `Idle -> Loading -> {Succeeded | Failed}` and a new
/// dispatch moves it back to `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request completed successfully.
    Succeeded,
    /// The last request failed; the slice's `error` holds the message.
    Failed,
}

impl RequestStatus {
    /// Whether a request is currently in flight.
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the last request failed.
    #[must_use]
    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(RequestStatus::default(), RequestStatus::Idle);
    }

    #[test]
    fn test_predicates() {
        assert!(RequestStatus::Loading.is_loading());
        assert!(!RequestStatus::Succeeded.is_loading());
        assert!(RequestStatus::Failed.is_failed());
        assert!(!RequestStatus::Idle.is_failed());
    }

    #[test]
    fn test_display() {
        assert_eq!(RequestStatus::Loading.to_string(), "loading");
        assert_eq!(RequestStatus::Failed.to_string(), "failed");
    }
}

use serde::{Deserialize, Serialize};

use crate::credentials::Credentials;
use crate::error::Error;
use crate::profile::UserProfile;

/// Authentication status.
///
/// Exactly one value at a time; transitions happen only through
/// [`SessionController`](super::SessionController) commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No session. The starting state, and the state after logout or a
    /// cancelled login.
    #[default]
    Unauthenticated,
    /// A login attempt is in flight. Transient: not externally re-enterable.
    Authenticating,
    /// Credentials are held. The profile may still be absent if enrichment
    /// failed.
    Authenticated,
    /// The last login attempt failed. `login()` retries from here.
    AuthenticationFailed,
}

/// Display-ready description of a login failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub reason: String,
}

impl From<&Error> for ErrorInfo {
    fn from(error: &Error) -> Self {
        Self {
            reason: error.reason(),
        }
    }
}

/// Immutable snapshot of the authentication condition at a point in time.
///
/// Replaced wholesale on every transition, never mutated in place, so readers
/// always observe a complete, consistent snapshot. Created once at
/// application start as `SessionState::default()` (unauthenticated).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SessionState {
    pub status: SessionStatus,
    pub credentials: Option<Credentials>,
    pub profile: Option<UserProfile>,
    pub error: Option<ErrorInfo>,
}

impl SessionState {
    /// True when the snapshot satisfies the session invariants:
    ///
    /// - authenticated iff credentials are present
    /// - a profile implies credentials
    /// - an error only outside the authenticating/authenticated states
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let creds_iff_authenticated =
            (self.status == SessionStatus::Authenticated) == self.credentials.is_some();
        let profile_implies_creds = self.profile.is_none() || self.credentials.is_some();
        let error_scope = self.error.is_none()
            || matches!(
                self.status,
                SessionStatus::Unauthenticated | SessionStatus::AuthenticationFailed
            );
        creds_iff_authenticated && profile_implies_creds && error_scope
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_unauthenticated_and_consistent() {
        let state = SessionState::default();
        assert_eq!(state.status, SessionStatus::Unauthenticated);
        assert!(state.credentials.is_none());
        assert!(state.profile.is_none());
        assert!(state.error.is_none());
        assert!(state.is_consistent());
        assert!(!state.is_authenticated());
    }

    #[test]
    fn authenticated_without_credentials_is_inconsistent() {
        let state = SessionState {
            status: SessionStatus::Authenticated,
            ..SessionState::default()
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn credentials_outside_authenticated_are_inconsistent() {
        let state = SessionState {
            status: SessionStatus::Unauthenticated,
            credentials: Some(Credentials::new("tok")),
            ..SessionState::default()
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn profile_without_credentials_is_inconsistent() {
        let state = SessionState {
            status: SessionStatus::Unauthenticated,
            profile: Some(UserProfile::new("auth0|u1")),
            ..SessionState::default()
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn error_while_authenticated_is_inconsistent() {
        let state = SessionState {
            status: SessionStatus::Authenticated,
            credentials: Some(Credentials::new("tok")),
            error: Some(ErrorInfo {
                reason: "network".into(),
            }),
            ..SessionState::default()
        };
        assert!(!state.is_consistent());
    }

    #[test]
    fn failed_state_with_error_is_consistent() {
        let state = SessionState {
            status: SessionStatus::AuthenticationFailed,
            error: Some(ErrorInfo {
                reason: "network".into(),
            }),
            ..SessionState::default()
        };
        assert!(state.is_consistent());
    }

    #[test]
    fn snapshot_serializes_for_ui_transport() {
        let state = SessionState {
            status: SessionStatus::Authenticated,
            credentials: Some(Credentials::new("tok")),
            profile: Some(UserProfile::new("auth0|u1").with_name("Alice")),
            error: None,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"status\":\"authenticated\""));
        let parsed: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}

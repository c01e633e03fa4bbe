use super::intent::{Intent, Route};
use super::provider::IdentityProvider;
use super::state::{ErrorInfo, SessionState, SessionStatus};

/// Scope string requested on login when none is configured.
pub const DEFAULT_SCOPE: &str = "openid profile email";

/// The session state machine.
///
/// Receives `login` / `logout` commands, drives the identity provider, and
/// replaces the [`SessionState`] snapshot wholesale on each transition. All
/// operations take `&mut self`: commands are serialized by construction, and
/// the re-entrancy guard in [`login`](Self::login) is the only additional
/// concurrency control. Side effects (navigation, notifications) are queued
/// as [`Intent`] values for the presentation layer to drain.
pub struct SessionController<P> {
    provider: P,
    scope: String,
    state: SessionState,
    intents: Vec<Intent>,
}

impl<P: IdentityProvider> SessionController<P> {
    /// Create a controller in the `Unauthenticated` state.
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            scope: DEFAULT_SCOPE.to_owned(),
            state: SessionState::default(),
            intents: Vec::new(),
        }
    }

    /// Override the scope string requested on login.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// The current session snapshot.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Drain the pending side-effect intents, in emission order.
    #[must_use]
    pub fn take_intents(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }

    /// Run the interactive login flow.
    ///
    /// A no-op returning the current snapshot while a login is already in
    /// flight or a session is active. On success the session becomes
    /// `Authenticated` and profile enrichment is attempted (best-effort: a
    /// failed fetch keeps the session, logs a warning, and leaves the
    /// profile absent), then `Navigate(Profile)` is emitted. Cancellation
    /// returns to `Unauthenticated` silently; failure parks the reason in
    /// the snapshot as `AuthenticationFailed` until the user retries.
    pub async fn login(&mut self) -> SessionState {
        match self.state.status {
            SessionStatus::Authenticating | SessionStatus::Authenticated => {
                tracing::debug!(status = ?self.state.status, "login ignored: already in flight or active");
                return self.state.clone();
            }
            SessionStatus::Unauthenticated | SessionStatus::AuthenticationFailed => {}
        }

        self.replace(SessionState {
            status: SessionStatus::Authenticating,
            ..SessionState::default()
        });

        match self.provider.authorize(&self.scope).await {
            Ok(credentials) => {
                let access_token = credentials.access_token.clone();
                self.replace(SessionState {
                    status: SessionStatus::Authenticated,
                    credentials: Some(credentials),
                    profile: None,
                    error: None,
                });
                self.fetch_profile(&access_token).await;
                self.intents.push(Intent::Navigate(Route::Profile));
                tracing::info!("login succeeded");
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!("login cancelled by user");
                self.replace(SessionState::default());
            }
            Err(e) => {
                tracing::warn!(error = %e, "authorization failed");
                self.replace(SessionState {
                    status: SessionStatus::AuthenticationFailed,
                    error: Some(ErrorInfo::from(&e)),
                    ..SessionState::default()
                });
            }
        }

        self.state.clone()
    }

    /// Clear the session. Safe and idempotent from any state.
    ///
    /// The remote session clear is best-effort: the local session is cleared
    /// no matter whether it succeeds, fails, or is cancelled (optimistic
    /// logout). Success emits `Navigate(Home)` and a logged-out
    /// notification; remote failure emits `Navigate(Home)` only and logs a
    /// warning; cancellation emits nothing.
    pub async fn logout(&mut self) -> SessionState {
        let result = self.provider.clear_session().await;

        self.replace(SessionState::default());

        match result {
            Ok(()) => {
                self.intents.push(Intent::Navigate(Route::Home));
                self.intents.push(Intent::Notify("Logged out!".to_owned()));
                tracing::info!("logout succeeded");
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!("remote session clear cancelled");
            }
            Err(e) => {
                tracing::warn!(error = %e, "remote session clear failed; local session cleared anyway");
                self.intents.push(Intent::Navigate(Route::Home));
            }
        }

        self.state.clone()
    }

    /// Resume a session from credentials the provider already holds.
    ///
    /// Intended for application start: if the provider has unexpired
    /// credentials, the session becomes `Authenticated` and profile
    /// enrichment is attempted with the same best-effort policy as
    /// [`login`](Self::login). Emits no intents — restoration is silent.
    pub async fn restore(&mut self) -> SessionState {
        match self.state.status {
            SessionStatus::Authenticating | SessionStatus::Authenticated => {
                return self.state.clone();
            }
            SessionStatus::Unauthenticated | SessionStatus::AuthenticationFailed => {}
        }

        let Some(credentials) = self.provider.credentials() else {
            return self.state.clone();
        };
        if credentials.is_expired() {
            tracing::debug!("stored credentials expired; staying unauthenticated");
            return self.state.clone();
        }

        let access_token = credentials.access_token.clone();
        self.replace(SessionState {
            status: SessionStatus::Authenticated,
            credentials: Some(credentials),
            profile: None,
            error: None,
        });
        self.fetch_profile(&access_token).await;
        tracing::info!("session restored from stored credentials");

        self.state.clone()
    }

    /// Best-effort profile enrichment.
    ///
    /// A failed fetch is logged and absorbed. A fetched profile whose owning
    /// credentials are no longer current is discarded, so a result arriving
    /// after the session moved on never leaks into the snapshot.
    async fn fetch_profile(&mut self, access_token: &str) {
        match self.provider.user_info(access_token).await {
            Ok(profile) => {
                let owning_session_current = self.state.status == SessionStatus::Authenticated
                    && self
                        .state
                        .credentials
                        .as_ref()
                        .is_some_and(|c| c.access_token == access_token);
                if owning_session_current {
                    self.state.profile = Some(profile);
                    debug_assert!(self.state.is_consistent());
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile fetch failed; continuing without profile");
            }
        }
    }

    fn replace(&mut self, next: SessionState) {
        debug_assert!(
            next.is_consistent(),
            "session transition broke an invariant: {next:?}"
        );
        self.state = next;
    }
}

#[cfg(test)]
impl<P: IdentityProvider> SessionController<P> {
    /// Start from an arbitrary snapshot (guard and transient-state tests).
    fn with_state(provider: P, state: SessionState) -> Self {
        let mut controller = Self::new(provider);
        controller.state = state;
        controller
    }
}

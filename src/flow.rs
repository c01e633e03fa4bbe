use std::future::Future;
use std::sync::{Mutex, PoisonError};

use crate::client::AuthClient;
use crate::credentials::Credentials;
use crate::error::Error;
use crate::profile::UserProfile;
use crate::session::IdentityProvider;

/// Parameters the provider appends to the redirect URI after an interactive
/// authorization.
#[derive(Debug, Clone)]
pub struct AuthorizationCallback {
    pub code: String,
    pub state: String,
}

/// Consumer-provided interactive seam: how authorization and logout URLs
/// reach the user.
///
/// Implementations open a browser tab, an in-app web view, or a test stub,
/// and wait for the provider to redirect back. Returning [`Error::Cancelled`]
/// from either method signals that the user dismissed the step; it is not
/// treated as a failure.
///
/// # Example
///
/// ```rust,ignore
/// impl UserAgent for SystemBrowser {
///     async fn authorize(&self, url: &str) -> Result<AuthorizationCallback, Error> {
///         open::that(url).map_err(|e| Error::provider("authorize", e.to_string()))?;
///         self.await_deep_link().await
///     }
///
///     async fn end_session(&self, url: &str) -> Result<(), Error> {
///         open::that(url).map_err(|e| Error::provider("clear session", e.to_string()))?;
///         self.await_return().await
///     }
/// }
/// ```
pub trait UserAgent: Send + Sync {
    /// Present the authorization URL and wait for the redirect callback.
    fn authorize(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<AuthorizationCallback, Error>> + Send;

    /// Present the logout URL and wait for the provider session to clear.
    fn end_session(&self, url: &str) -> impl Future<Output = Result<(), Error>> + Send;
}

/// Interactive web authorization flow over an [`AuthClient`].
///
/// Implements [`IdentityProvider`]: generates PKCE material, validates the
/// callback `state` against the request, exchanges the code for credentials,
/// and keeps an in-memory copy of the last issued credentials for silent
/// session restoration. A `state` mismatch is a failure, not a cancellation.
pub struct WebAuthFlow<A> {
    client: AuthClient,
    agent: A,
    issued: Mutex<Option<Credentials>>,
}

impl<A: UserAgent> WebAuthFlow<A> {
    /// Create a flow from a provider client and an interactive user agent.
    #[must_use]
    pub fn new(client: AuthClient, agent: A) -> Self {
        Self {
            client,
            agent,
            issued: Mutex::new(None),
        }
    }

    /// The underlying provider client.
    #[must_use]
    pub fn client(&self) -> &AuthClient {
        &self.client
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, Option<Credentials>> {
        self.issued.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: UserAgent> IdentityProvider for WebAuthFlow<A> {
    async fn authorize(&self, scope: &str) -> Result<Credentials, Error> {
        let request = self.client.authorization_url(scope);
        let callback = self.agent.authorize(&request.url).await?;

        if callback.state != request.state {
            tracing::warn!("authorization callback state mismatch");
            return Err(Error::provider("authorize", "state mismatch"));
        }

        let credentials = self
            .client
            .exchange_code(&callback.code, &request.code_verifier)
            .await?;
        *self.cache() = Some(credentials.clone());
        Ok(credentials)
    }

    async fn clear_session(&self) -> Result<(), Error> {
        // Optimistic, like the controller's local clear: the cached
        // credentials are dropped no matter how the remote clear ends, so a
        // later restoration cannot resurrect a session the user ended.
        self.cache().take();
        let url = self.client.logout_url(None);
        self.agent.end_session(&url).await
    }

    async fn user_info(&self, access_token: &str) -> Result<UserProfile, Error> {
        self.client.user_info(access_token).await
    }

    fn credentials(&self) -> Option<Credentials> {
        self.cache().clone()
    }
}

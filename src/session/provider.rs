use std::future::Future;

use crate::credentials::Credentials;
use crate::error::Error;
use crate::profile::UserProfile;

/// Identity-provider capability set consumed by the session controller.
///
/// The crate's `http` feature ships one implementation
/// ([`WebAuthFlow`](crate::flow::WebAuthFlow)); anything satisfying this
/// trait works, including test doubles. Timeouts are the implementation's
/// responsibility — the controller imposes no deadline of its own.
///
/// # Example
///
/// ```rust,ignore
/// impl IdentityProvider for MySdkBridge {
///     async fn authorize(&self, scope: &str) -> Result<Credentials, Error> {
///         self.sdk.web_auth(scope).await.map_err(into_crate_error)
///     }
///     // ...
/// }
/// ```
pub trait IdentityProvider: Send + Sync {
    /// Run the provider's interactive authorization flow.
    ///
    /// `scope` is the space-delimited OAuth scope string. Returns
    /// [`Error::Cancelled`] when the user dismisses the flow; any other
    /// error is an authorization failure.
    fn authorize(&self, scope: &str)
        -> impl Future<Output = Result<Credentials, Error>> + Send;

    /// Clear the provider-side session (interactive for web-based
    /// providers). Returns [`Error::Cancelled`] when the user dismisses the
    /// step.
    fn clear_session(&self) -> impl Future<Output = Result<(), Error>> + Send;

    /// Fetch identity attributes for an access token.
    fn user_info(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<UserProfile, Error>> + Send;

    /// Credentials the provider already holds (e.g. issued during an earlier
    /// run), if any. Consumed by silent session restoration.
    fn credentials(&self) -> Option<Credentials>;
}

use serde::Deserialize;
use time::{Duration, OffsetDateTime};

use crate::config::AuthConfig;
use crate::credentials::Credentials;
use crate::error::Error;
use crate::pkce;
use crate::profile::UserProfile;

/// Authorization URL plus the PKCE parameters the caller must hold onto
/// until the redirect callback returns.
#[non_exhaustive]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
    pub code_verifier: String,
}

/// Token response from the provider's token endpoint.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl From<TokenResponse> for Credentials {
    fn from(token: TokenResponse) -> Self {
        // expires_in is provider-controlled wire input; an absurd value must
        // not overflow the date arithmetic. Out-of-range lifetimes collapse
        // to "no expiry".
        let expires_at = token.expires_in.and_then(|secs| {
            let secs = i64::try_from(secs).ok()?;
            OffsetDateTime::now_utc().checked_add(Duration::seconds(secs))
        });
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            refresh_token: token.refresh_token,
            expires_at,
        }
    }
}

/// HTTP client for an Auth0-style identity provider.
///
/// Covers the non-interactive legs of the flow: building the authorization
/// URL, exchanging the callback code, fetching user info, and building the
/// logout URL. The interactive legs belong to
/// [`WebAuthFlow`](crate::flow::WebAuthFlow).
pub struct AuthClient {
    config: AuthConfig,
    http: reqwest::Client,
}

impl AuthClient {
    /// Create a new client for the configured provider.
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// The provider configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Generate an authorization URL with fresh PKCE parameters.
    #[must_use]
    pub fn authorization_url(&self, scope: &str) -> AuthorizationRequest {
        let state = pkce::generate_state();
        let code_verifier = pkce::generate_code_verifier();
        let code_challenge = pkce::generate_code_challenge(&code_verifier);

        let mut url = self.config.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", self.config.redirect_uri.as_str())
            .append_pair("state", &state)
            .append_pair("code_challenge", &code_challenge)
            .append_pair("code_challenge_method", "S256")
            .append_pair("scope", scope);

        AuthorizationRequest {
            url: url.into(),
            state,
            code_verifier,
        }
    }

    /// Exchange an authorization code for credentials using PKCE.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Provider`]
    /// if the token endpoint returns an error.
    pub async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<Credentials, Error> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("code_verifier", code_verifier),
        ];

        let response = self
            .http
            .post(self.config.token_url.clone())
            .form(&params)
            .send()
            .await?;

        let response = Self::ensure_success(response, "token exchange").await?;
        let token = response.json::<TokenResponse>().await?;
        Ok(token.into())
    }

    /// Fetch user info with an access token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Provider`]
    /// if the userinfo endpoint returns an error.
    pub async fn user_info(&self, access_token: &str) -> Result<UserProfile, Error> {
        let response = self
            .http
            .get(self.config.userinfo_url.clone())
            .bearer_auth(access_token)
            .send()
            .await?;

        let response = Self::ensure_success(response, "userinfo request").await?;
        response.json::<UserProfile>().await.map_err(Into::into)
    }

    /// Build the logout URL that clears the provider-side session.
    ///
    /// `return_to` is where the provider redirects after clearing; it must be
    /// allow-listed in the provider's client settings.
    #[must_use]
    pub fn logout_url(&self, return_to: Option<&str>) -> String {
        let mut url = self.config.logout_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("client_id", &self.config.client_id);
            if let Some(return_to) = return_to {
                pairs.append_pair("returnTo", return_to);
            }
        }
        url.into()
    }

    /// Checks HTTP response status; returns the response on success or an
    /// error with details.
    async fn ensure_success(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<reqwest::Response, Error> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let detail = response.text().await.unwrap_or_default();
        Err(Error::Provider {
            operation,
            status: Some(status),
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DEFAULT_SCOPE;

    fn test_client() -> AuthClient {
        let config = AuthConfig::new(
            "my-tenant.us.auth0.com",
            "client-123",
            "com.example.app://callback".parse().unwrap(),
        )
        .unwrap();
        AuthClient::new(config)
    }

    #[test]
    fn authorization_url_contains_pkce_and_scope() {
        let client = test_client();
        let req = client.authorization_url(DEFAULT_SCOPE);

        assert!(req.url.starts_with("https://my-tenant.us.auth0.com/authorize?"));
        assert!(req.url.contains("response_type=code"));
        assert!(req.url.contains("client_id=client-123"));
        assert!(req.url.contains("code_challenge="));
        assert!(req.url.contains("code_challenge_method=S256"));
        assert!(req.url.contains("scope=openid+profile+email"));
        assert!(!req.state.is_empty());
        assert!(!req.code_verifier.is_empty());
    }

    #[test]
    fn authorization_requests_are_unique_per_call() {
        let client = test_client();
        let a = client.authorization_url(DEFAULT_SCOPE);
        let b = client.authorization_url(DEFAULT_SCOPE);

        assert_ne!(a.state, b.state);
        assert_ne!(a.code_verifier, b.code_verifier);
    }

    #[test]
    fn logout_url_carries_client_id_and_return_to() {
        let client = test_client();
        let url = client.logout_url(Some("com.example.app://callback"));
        assert!(url.starts_with("https://my-tenant.us.auth0.com/v2/logout?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("returnTo="));

        let bare = client.logout_url(None);
        assert!(!bare.contains("returnTo="));
    }

    #[test]
    fn token_response_maps_expiry_to_instant() {
        let token = TokenResponse {
            access_token: "tok".into(),
            token_type: "Bearer".into(),
            expires_in: Some(3600),
            refresh_token: Some("refresh".into()),
        };
        let creds: Credentials = token.into();
        assert_eq!(creds.access_token, "tok");
        assert_eq!(creds.refresh_token.as_deref(), Some("refresh"));
        let expires_at = creds.expires_at.unwrap();
        assert!(expires_at > OffsetDateTime::now_utc() + Duration::minutes(55));
        assert!(expires_at <= OffsetDateTime::now_utc() + Duration::minutes(61));
    }

    #[test]
    fn absurd_expiry_from_the_wire_does_not_overflow() {
        // Past time's representable date range; must degrade to "no
        // expiry" rather than panic in the date arithmetic.
        let token = TokenResponse {
            access_token: "tok".into(),
            token_type: "Bearer".into(),
            expires_in: Some(300_000_000_000),
            refresh_token: None,
        };
        let creds: Credentials = token.into();
        assert!(creds.expires_at.is_none());
        assert!(!creds.is_expired());

        let beyond_i64 = TokenResponse {
            access_token: "tok".into(),
            token_type: "Bearer".into(),
            expires_in: Some(u64::MAX),
            refresh_token: None,
        };
        let creds: Credentials = beyond_i64.into();
        assert!(creds.expires_at.is_none());
    }

    #[test]
    fn token_response_without_expiry_yields_no_instant() {
        let token = TokenResponse {
            access_token: "tok".into(),
            token_type: "Bearer".into(),
            expires_in: None,
            refresh_token: None,
        };
        let creds: Credentials = token.into();
        assert!(creds.expires_at.is_none());
        assert!(!creds.is_expired());
    }
}

use url::Url;

use crate::error::Error;
use crate::session::DEFAULT_SCOPE;

/// Identity-provider configuration.
///
/// Required fields are constructor parameters — no runtime "missing field"
/// errors. Endpoint URLs follow the Auth0 tenant convention
/// (`https://{domain}/authorize`, `/oauth/token`, `/userinfo`, `/v2/logout`)
/// and can be overridden individually for other providers.
///
/// ```rust,ignore
/// use auth0_session::AuthConfig;
///
/// let config = AuthConfig::new(
///     "my-tenant.us.auth0.com",
///     "my-client-id",
///     "com.example.app://callback".parse()?,
/// )?;
/// ```
///
/// Loaded once at process start; immutable thereafter.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct AuthConfig {
    pub(crate) domain: String,
    pub(crate) client_id: String,
    pub(crate) authorize_url: Url,
    pub(crate) token_url: Url,
    pub(crate) userinfo_url: Url,
    pub(crate) logout_url: Url,
    pub(crate) redirect_uri: Url,
    pub(crate) scopes: Vec<String>,
}

impl AuthConfig {
    /// Create a configuration for an Auth0-style tenant domain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the domain does not form a valid HTTPS
    /// base URL.
    pub fn new(
        domain: impl AsRef<str>,
        client_id: impl Into<String>,
        redirect_uri: Url,
    ) -> Result<Self, Error> {
        let domain = domain.as_ref().trim_end_matches('/').to_owned();
        let base: Url = format!("https://{domain}/")
            .parse()
            .map_err(|e| Error::Config(format!("invalid domain {domain:?}: {e}")))?;
        if base.host_str().is_none() {
            return Err(Error::Config(format!("invalid domain {domain:?}: no host")));
        }

        Ok(Self {
            authorize_url: base.join("authorize").expect("valid derived URL"),
            token_url: base.join("oauth/token").expect("valid derived URL"),
            userinfo_url: base.join("userinfo").expect("valid derived URL"),
            logout_url: base.join("v2/logout").expect("valid derived URL"),
            domain,
            client_id: client_id.into(),
            redirect_uri,
            scopes: DEFAULT_SCOPE.split(' ').map(str::to_owned).collect(),
        })
    }

    /// Create a configuration from environment variables.
    ///
    /// # Required env vars
    /// - `AUTH0_DOMAIN`: tenant domain (e.g. `my-tenant.us.auth0.com`)
    /// - `AUTH0_CLIENT_ID`: OAuth2 client ID
    /// - `AUTH0_REDIRECT_URI`: callback URI (must be a valid URL)
    ///
    /// # Optional env vars
    /// - `AUTH0_SCOPES`: space- or comma-separated scopes
    ///   (default: `openid profile email`)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if required env vars are missing or invalid.
    pub fn from_env() -> Result<Self, Error> {
        let domain = std::env::var("AUTH0_DOMAIN")
            .map_err(|_| Error::Config("AUTH0_DOMAIN is required".into()))?;
        let client_id = std::env::var("AUTH0_CLIENT_ID")
            .map_err(|_| Error::Config("AUTH0_CLIENT_ID is required".into()))?;
        let redirect_uri: Url = std::env::var("AUTH0_REDIRECT_URI")
            .map_err(|_| Error::Config("AUTH0_REDIRECT_URI is required".into()))?
            .parse()
            .map_err(|e| Error::Config(format!("AUTH0_REDIRECT_URI: {e}")))?;

        let mut config = Self::new(domain, client_id, redirect_uri)?;
        if let Ok(scopes) = std::env::var("AUTH0_SCOPES") {
            config = config.with_scopes(
                scopes
                    .split([' ', ','])
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
                    .collect(),
            );
        }
        Ok(config)
    }

    /// Override the authorization endpoint.
    #[must_use]
    pub fn with_authorize_url(mut self, url: Url) -> Self {
        self.authorize_url = url;
        self
    }

    /// Override the token exchange endpoint.
    #[must_use]
    pub fn with_token_url(mut self, url: Url) -> Self {
        self.token_url = url;
        self
    }

    /// Override the userinfo endpoint.
    #[must_use]
    pub fn with_userinfo_url(mut self, url: Url) -> Self {
        self.userinfo_url = url;
        self
    }

    /// Override the logout endpoint.
    #[must_use]
    pub fn with_logout_url(mut self, url: Url) -> Self {
        self.logout_url = url;
        self
    }

    /// Override the requested scopes (default: `openid profile email`).
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Tenant domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// OAuth2 client ID.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Authorization endpoint URL.
    #[must_use]
    pub fn authorize_url(&self) -> &Url {
        &self.authorize_url
    }

    /// Token exchange endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Userinfo endpoint URL.
    #[must_use]
    pub fn userinfo_url(&self) -> &Url {
        &self.userinfo_url
    }

    /// Logout endpoint URL.
    #[must_use]
    pub fn logout_url(&self) -> &Url {
        &self.logout_url
    }

    /// Redirect URI the provider calls back to.
    #[must_use]
    pub fn redirect_uri(&self) -> &Url {
        &self.redirect_uri
    }

    /// Requested OAuth2 scopes.
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Scopes joined into the space-delimited wire format.
    #[must_use]
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig::new(
            "my-tenant.us.auth0.com",
            "client-123",
            "com.example.app://callback".parse().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn derives_auth0_endpoints_from_domain() {
        let config = test_config();
        assert_eq!(config.domain(), "my-tenant.us.auth0.com");
        assert_eq!(
            config.authorize_url().as_str(),
            "https://my-tenant.us.auth0.com/authorize"
        );
        assert_eq!(
            config.token_url().as_str(),
            "https://my-tenant.us.auth0.com/oauth/token"
        );
        assert_eq!(
            config.userinfo_url().as_str(),
            "https://my-tenant.us.auth0.com/userinfo"
        );
        assert_eq!(
            config.logout_url().as_str(),
            "https://my-tenant.us.auth0.com/v2/logout"
        );
    }

    #[test]
    fn default_scopes_match_openid_profile_email() {
        let config = test_config();
        assert_eq!(config.scopes(), &["openid", "profile", "email"]);
        assert_eq!(config.scope_string(), "openid profile email");
    }

    #[test]
    fn trailing_slash_in_domain_is_tolerated() {
        let config = AuthConfig::new(
            "my-tenant.us.auth0.com/",
            "client-123",
            "com.example.app://callback".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(
            config.authorize_url().as_str(),
            "https://my-tenant.us.auth0.com/authorize"
        );
    }

    #[test]
    fn endpoint_overrides_apply() {
        let config = test_config()
            .with_userinfo_url("https://idp.example.com/oidc/userinfo".parse().unwrap())
            .with_scopes(vec!["openid".into()]);
        assert_eq!(
            config.userinfo_url().as_str(),
            "https://idp.example.com/oidc/userinfo"
        );
        assert_eq!(config.scope_string(), "openid");
    }

    #[test]
    fn invalid_domain_is_a_config_error() {
        let err = AuthConfig::new(
            "not a domain",
            "client-123",
            "com.example.app://callback".parse().unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    // Env manipulation is process-global, so every from_env case lives in
    // one test to avoid interference under the parallel test runner.
    #[test]
    fn from_env_reads_and_validates() {
        std::env::remove_var("AUTH0_DOMAIN");
        std::env::remove_var("AUTH0_CLIENT_ID");
        std::env::remove_var("AUTH0_REDIRECT_URI");
        std::env::remove_var("AUTH0_SCOPES");

        let err = AuthConfig::from_env().unwrap_err();
        assert!(err.reason().contains("AUTH0_DOMAIN"));

        std::env::set_var("AUTH0_DOMAIN", "env-tenant.eu.auth0.com");
        std::env::set_var("AUTH0_CLIENT_ID", "env-client");
        std::env::set_var("AUTH0_REDIRECT_URI", "com.example.app://callback");
        std::env::set_var("AUTH0_SCOPES", "openid,profile");

        let config = AuthConfig::from_env().unwrap();
        assert_eq!(config.client_id(), "env-client");
        assert_eq!(config.scopes(), &["openid", "profile"]);

        std::env::remove_var("AUTH0_DOMAIN");
        std::env::remove_var("AUTH0_CLIENT_ID");
        std::env::remove_var("AUTH0_REDIRECT_URI");
        std::env::remove_var("AUTH0_SCOPES");
    }
}

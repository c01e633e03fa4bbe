use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Identity-provider subject identifier (OIDC `sub` claim).
///
/// Immutable, unique per account, and opaque to this crate — Auth0 issues
/// values like `auth0|5f7c8ec7c33c6c004bbafe82` or `google-oauth2|1234`.
/// Consumers store this as the sole link to provider identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct SubjectId(pub String);

impl SubjectId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

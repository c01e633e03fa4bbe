use serde::{Deserialize, Serialize};

use crate::types::SubjectId;

/// Identity attributes from the provider's userinfo endpoint.
///
/// Retrieved with an access token after authorization; the session core never
/// constructs one itself. Transient display data — fetch again when needed
/// rather than persisting provider-owned fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct UserProfile {
    pub sub: SubjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl UserProfile {
    /// Create a new `UserProfile` with only the required `sub` field.
    #[must_use]
    pub fn new(sub: impl Into<SubjectId>) -> Self {
        Self {
            sub: sub.into(),
            name: String::new(),
            email: String::new(),
            picture: None,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the picture URL.
    #[must_use]
    pub fn with_picture(mut self, url: impl Into<String>) -> Self {
        self.picture = Some(url.into());
        self
    }

    /// Name to greet the user with: `name`, falling back to `email`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

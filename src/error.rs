#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The user dismissed an interactive step (closed the web view, declined
    /// the prompt). Distinct from failure: callers return to their previous
    /// state without surfacing an alert.
    #[error("interactive flow cancelled")]
    Cancelled,

    /// The identity provider rejected an operation, or it failed in transit.
    #[error("{operation} failed: {detail}")]
    Provider {
        operation: &'static str,
        status: Option<u16>,
        detail: String,
    },

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Provider-side failure without an HTTP status.
    #[must_use]
    pub fn provider(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::Provider {
            operation,
            status: None,
            detail: detail.into(),
        }
    }

    /// True for the user-cancellation outcome.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Short reason string for display in session snapshots.
    ///
    /// Provider failures yield the provider's own detail message rather than
    /// the full `Display` rendering.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::Provider { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_is_not_a_provider_failure() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::provider("authorize", "denied").is_cancelled());
    }

    #[test]
    fn reason_uses_provider_detail() {
        let err = Error::provider("authorize", "network");
        assert_eq!(err.reason(), "network");
    }

    #[test]
    fn reason_falls_back_to_display() {
        assert_eq!(Error::Cancelled.reason(), "interactive flow cancelled");
        assert_eq!(
            Error::Config("AUTH0_DOMAIN is required".into()).reason(),
            "configuration error: AUTH0_DOMAIN is required"
        );
    }
}

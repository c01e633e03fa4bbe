#![doc = include_str!("../README.md")]

pub mod credentials;
pub mod error;
pub mod profile;
pub mod session;
pub mod types;

#[cfg(feature = "http")]
pub mod client;
#[cfg(feature = "http")]
pub mod config;
#[cfg(feature = "http")]
pub mod flow;
#[cfg(feature = "http")]
pub mod pkce;

// Re-exports for convenient access
pub use credentials::Credentials;
pub use error::Error;
pub use profile::UserProfile;
pub use session::{
    ErrorInfo, IdentityProvider, Intent, Route, SessionController, SessionState, SessionStatus,
    DEFAULT_SCOPE,
};
pub use types::SubjectId;

#[cfg(feature = "http")]
pub use client::{AuthClient, AuthorizationRequest, TokenResponse};
#[cfg(feature = "http")]
pub use config::AuthConfig;
#[cfg(feature = "http")]
pub use flow::{AuthorizationCallback, UserAgent, WebAuthFlow};
#[cfg(feature = "http")]
pub use pkce::{generate_code_challenge, generate_code_verifier, generate_state};

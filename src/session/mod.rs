//! Client-side authentication session lifecycle.
//!
//! The session core is a small state machine driven by two commands, `login`
//! and `logout`, against a provider capability the consumer supplies. UI
//! concerns stay outside: the controller returns immutable snapshots and
//! emits navigation/notification intents as data.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use auth0_session::{Intent, Route, SessionController};
//!
//! // 1. Implement IdentityProvider (or use WebAuthFlow from the `http` feature)
//! let mut session = SessionController::new(provider);
//!
//! // 2. Dispatch commands from your UI shell
//! let snapshot = session.login().await;
//!
//! // 3. Render the snapshot, then perform the emitted intents
//! for intent in session.take_intents() {
//!     match intent {
//!         Intent::Navigate(Route::Profile) => show_profile(),
//!         Intent::Navigate(Route::Home) => show_home(),
//!         Intent::Notify(message) => toast(message),
//!     }
//! }
//! ```

mod controller;
mod intent;
mod provider;
mod state;

pub use controller::{SessionController, DEFAULT_SCOPE};
pub use intent::{Intent, Route};
pub use provider::IdentityProvider;
pub use state::{ErrorInfo, SessionState, SessionStatus};

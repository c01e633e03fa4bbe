use serde::{Deserialize, Serialize};

/// Navigation targets the presentation layer knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Profile,
}

/// A side effect described as data.
///
/// The controller never calls into UI code; it queues intents for the
/// presentation layer to carry out after it observes the snapshot that
/// produced them. This keeps transitions testable without a rendering
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Move the user to a screen.
    Navigate(Route),
    /// Show a transient, non-blocking message.
    Notify(String),
}

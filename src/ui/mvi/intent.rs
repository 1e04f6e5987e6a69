//! Base trait for intents.

/// Marker trait for intent objects.
///
/// Intents are either user actions (a button press) or system events
/// (an API response arriving). Reducers turn them into new states.
pub trait Intent: Send + 'static {}

/// Marker trait for UI state objects.
///
/// States are cloned rather than mutated, compared to detect changes, and
/// default to the state shown before any intent arrives.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

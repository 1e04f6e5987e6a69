use crate::store::Delta;
use crate::ui::mvi::UiState;

/// Banner text when loading the counter fails.
pub const FETCH_ERROR: &str = "Unable to load counter";

/// Banner text when a mutation fails.
pub fn failure_message(delta: Delta) -> &'static str {
    match delta {
        Delta::Increment => "Unable to increment counter",
        Delta::Decrement => "Unable to decrement counter",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CounterState {
    /// Last value confirmed by the server.
    pub value: i64,
    /// A mutation is in flight; controls are disabled.
    pub loading: bool,
    pub error: Option<String>,
}

impl UiState for CounterState {}

impl CounterState {
    pub fn controls_enabled(&self) -> bool {
        !self.loading
    }
}

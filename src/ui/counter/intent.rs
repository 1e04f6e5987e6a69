use crate::store::Delta;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterIntent {
    /// A fetch request was issued.
    FetchStarted,
    FetchSucceeded { value: i64 },
    FetchFailed,
    /// An increment/decrement request was issued.
    MutationStarted { delta: Delta },
    MutationSucceeded { value: i64 },
    MutationFailed { delta: Delta },
}

impl Intent for CounterIntent {}

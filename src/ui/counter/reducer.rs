use crate::ui::counter::intent::CounterIntent;
use crate::ui::counter::state::{failure_message, CounterState, FETCH_ERROR};
use crate::ui::mvi::Reducer;

pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Intent = CounterIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CounterIntent::FetchStarted => CounterState {
                error: None,
                ..state
            },
            CounterIntent::FetchSucceeded { value } => CounterState { value, ..state },
            CounterIntent::FetchFailed => CounterState {
                error: Some(FETCH_ERROR.to_string()),
                ..state
            },
            CounterIntent::MutationStarted { .. } => CounterState {
                loading: true,
                error: None,
                ..state
            },
            // Both completions clear `loading`, whatever the outcome.
            CounterIntent::MutationSucceeded { value } => CounterState {
                value,
                loading: false,
                ..state
            },
            CounterIntent::MutationFailed { delta } => CounterState {
                loading: false,
                error: Some(failure_message(delta).to_string()),
                ..state
            },
        }
    }
}

mod intent;
mod reducer;
mod state;

pub use intent::CounterIntent;
pub use reducer::CounterReducer;
pub use state::{failure_message, CounterState, FETCH_ERROR};

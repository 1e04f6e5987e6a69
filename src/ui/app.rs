use tokio::sync::mpsc;

use crate::store::Delta;
use crate::ui::counter::{CounterIntent, CounterReducer, CounterState};
use crate::ui::mvi::Reducer;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Button {
    Decrement,
    Increment,
    Refresh,
}

impl Button {
    /// Focus order, left to right then the refresh row.
    pub const ALL: [Button; 3] = [Button::Decrement, Button::Increment, Button::Refresh];

    fn index(self) -> usize {
        match self {
            Button::Decrement => 0,
            Button::Increment => 1,
            Button::Refresh => 2,
        }
    }
}

/// Work the app asks the request worker to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Fetch,
    Mutate(Delta),
}

pub type UiCommandSender = mpsc::Sender<UiCommand>;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    focus: Button,
    api_url: String,
    /// Counter view state (MVI pattern).
    counter: CounterState,
    commands: Option<UiCommandSender>,
}

impl App {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            should_quit: false,
            focus: Button::Increment,
            api_url: api_url.into(),
            counter: CounterState::default(),
            commands: None,
        }
    }

    pub fn attach_commands(&mut self, sender: UiCommandSender) {
        self.commands = Some(sender);
    }

    pub fn counter(&self) -> &CounterState {
        &self.counter
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn focus(&self) -> Button {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn dispatch(&mut self, intent: CounterIntent) {
        dispatch_mvi!(self, counter, CounterReducer, intent);
    }

    /// Reload the value from the server. Refused while a mutation is in flight.
    pub fn refresh(&mut self) -> bool {
        if !self.counter.controls_enabled() {
            return false;
        }
        self.dispatch(CounterIntent::FetchStarted);
        if !self.send(UiCommand::Fetch) {
            self.dispatch(CounterIntent::FetchFailed);
        }
        true
    }

    /// Issue an increment/decrement. Refused while one is already in flight.
    pub fn mutate(&mut self, delta: Delta) -> bool {
        if !self.counter.controls_enabled() {
            return false;
        }
        self.dispatch(CounterIntent::MutationStarted { delta });
        if !self.send(UiCommand::Mutate(delta)) {
            self.dispatch(CounterIntent::MutationFailed { delta });
        }
        true
    }

    pub fn press(&mut self, button: Button) -> bool {
        match button {
            Button::Decrement => self.mutate(Delta::Decrement),
            Button::Increment => self.mutate(Delta::Increment),
            Button::Refresh => self.refresh(),
        }
    }

    pub fn focus_next(&mut self) {
        let next = (self.focus.index() + 1) % Button::ALL.len();
        self.focus = Button::ALL[next];
    }

    pub fn focus_prev(&mut self) {
        let len = Button::ALL.len();
        let prev = (self.focus.index() + len - 1) % len;
        self.focus = Button::ALL[prev];
    }

    fn send(&self, command: UiCommand) -> bool {
        match &self.commands {
            Some(sender) => match sender.try_send(command) {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(?command, error = %err, "Request worker unavailable");
                    false
                }
            },
            None => false,
        }
    }
}

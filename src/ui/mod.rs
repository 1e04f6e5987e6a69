//! Terminal client for the counter service.
//!
//! View state lives in [`counter`] and only changes through its reducer;
//! [`app::App`] turns key presses into intents and requests, and
//! [`worker`] performs the HTTP calls off the render loop.

pub mod app;
pub mod counter;
pub mod events;
pub mod input;
pub mod layout;
pub mod mvi;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;
pub mod worker;

pub use runtime::run;

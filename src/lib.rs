//! Single persisted counter: storage backends, the HTTP API serving them,
//! and a terminal client driving the API.

pub mod api;
pub mod client;
pub mod config;
pub mod logging;
pub mod store;
pub mod ui;

//! HTTP API over the counter store.
//!
//! | Method | Path                     | 200                 |
//! |--------|--------------------------|---------------------|
//! | GET    | `/api/counter`           | `{"value": n}`      |
//! | POST   | `/api/counter/increment` | `{"value": n}`      |
//! | POST   | `/api/counter/decrement` | `{"value": n}`      |
//! | GET    | `/health`                | `{"status": "ok"}`  |
//!
//! Store failures answer 500 with `{"error": "<message>"}`.

mod cors;
pub mod error;
mod health;
mod router;
mod server;
mod shutdown;
pub mod types;

pub use cors::AllowedOrigins;
pub use error::{ApiError, CounterOp, ErrorResponse, ServeError};
pub use router::{build_router, AppState};
pub use server::{serve, CounterServer, ServerHandle};
pub use shutdown::ShutdownManager;
pub use types::{CounterResponse, ErrorBody, HealthStatus};

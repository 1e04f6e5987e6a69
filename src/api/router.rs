use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::api::cors::AllowedOrigins;
use crate::api::error::{ApiError, CounterOp};
use crate::api::health::health;
use crate::api::types::CounterResponse;
use crate::store::CounterStore;

/// Shared handler state: the injected store handle.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn CounterStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CounterStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<dyn CounterStore> {
        self.store.clone()
    }
}

pub fn build_router(state: AppState, origins: &AllowedOrigins) -> Router {
    Router::new()
        .route("/api/counter", get(get_counter))
        .route("/api/counter/increment", post(increment))
        .route("/api/counter/decrement", post(decrement))
        .route("/health", get(health))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(origins.layer()),
        )
}

async fn get_counter(State(state): State<AppState>) -> Result<Json<CounterResponse>, ApiError> {
    let value = state
        .store
        .get_value()
        .await
        .map_err(|e| ApiError::storage(CounterOp::Read, e))?;
    Ok(Json(CounterResponse { value }))
}

async fn increment(State(state): State<AppState>) -> Result<Json<CounterResponse>, ApiError> {
    let value = state
        .store
        .increment()
        .await
        .map_err(|e| ApiError::storage(CounterOp::Increment, e))?;
    tracing::debug!(value, "Counter incremented");
    Ok(Json(CounterResponse { value }))
}

async fn decrement(State(state): State<AppState>) -> Result<Json<CounterResponse>, ApiError> {
    let value = state
        .store
        .decrement()
        .await
        .map_err(|e| ApiError::storage(CounterOp::Decrement, e))?;
    tracing::debug!(value, "Counter decremented");
    Ok(Json(CounterResponse { value }))
}

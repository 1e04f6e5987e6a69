//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use counter_app::api::{CounterServer, ServerHandle};
use counter_app::config::Config;
use counter_app::store::{CounterRecord, CounterStore, Delta, StoreError};
use tempfile::TempDir;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Wait for a server to become available.
pub async fn wait_for_server(addr: SocketAddr, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

/// Config bound to an ephemeral loopback port.
pub fn test_config(cors_origin: &str) -> Config {
    let mut config = Config::default();
    config.server.bind_addr = "127.0.0.1:0".to_string();
    config.server.cors_origin = cors_origin.to_string();
    config
}

/// Start a server on `store` and return its address and shutdown handle.
pub async fn spawn_server(store: Arc<dyn CounterStore>) -> (SocketAddr, ServerHandle) {
    spawn_server_with(store, &test_config("*")).await
}

pub async fn spawn_server_with(
    store: Arc<dyn CounterStore>,
    config: &Config,
) -> (SocketAddr, ServerHandle) {
    let mut server = CounterServer::new(config, store).expect("valid test config");
    let addr = server.try_bind().await.expect("bind test server");
    let handle = server.handle();
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    assert!(
        wait_for_server(addr, Duration::from_secs(5)).await,
        "server did not start"
    );
    (addr, handle)
}

/// Temporary directory plus a path for a counter file inside it.
pub fn temp_counter_path() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("data").join("counter.json");
    (dir, path)
}

/// Store whose backend is never reachable.
pub struct OfflineStore;

fn offline() -> StoreError {
    StoreError::Unavailable {
        backend: "offline",
        message: "connection refused".to_string(),
    }
}

#[async_trait]
impl CounterStore for OfflineStore {
    fn backend(&self) -> &'static str {
        "offline"
    }

    async fn ensure_initialized(&self) -> Result<(), StoreError> {
        Err(offline())
    }

    async fn record(&self) -> Result<CounterRecord, StoreError> {
        Err(offline())
    }

    async fn apply(&self, _delta: Delta) -> Result<i64, StoreError> {
        Err(offline())
    }
}

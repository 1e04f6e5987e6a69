//! Binding and shutdown of the counter server.

mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use counter_app::api::{serve, CounterServer};
use counter_app::store::{CounterStore, MemoryStore};

fn memory_store() -> Arc<dyn CounterStore> {
    Arc::new(MemoryStore::with_value(0))
}

/// Each server keeps its listener between try_bind() and run(), so port 0
/// always yields distinct ports.
#[tokio::test]
async fn test_port_zero_binding_yields_unique_ports() {
    let config = common::test_config("*");
    let mut servers = Vec::new();
    let mut ports = HashSet::new();
    for _ in 0..5 {
        let mut server = CounterServer::new(&config, memory_store()).unwrap();
        let addr = server.try_bind().await.unwrap();
        assert_ne!(addr.port(), 0);
        assert!(ports.insert(addr.port()));
        servers.push(server);
    }
}

#[tokio::test]
async fn test_bind_conflict_is_reported() {
    let port = common::free_port();
    let _holder = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .unwrap();

    let mut config = common::test_config("*");
    config.server.bind_addr = format!("127.0.0.1:{}", port);
    let mut server = CounterServer::new(&config, memory_store()).unwrap();
    assert!(server.try_bind().await.is_err());
}

#[tokio::test]
async fn test_shutdown_handle_stops_run() {
    let mut server = CounterServer::new(&common::test_config("*"), memory_store()).unwrap();
    let addr = server.try_bind().await.unwrap();
    let handle = server.handle();
    let task = tokio::spawn(server.run());
    assert!(common::wait_for_server(addr, Duration::from_secs(5)).await);

    handle.shutdown();
    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("server should stop after shutdown")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_invalid_cors_setting_rejected_at_construction() {
    let config = common::test_config("http://a.test, *");
    assert!(CounterServer::new(&config, memory_store()).is_err());
}

#[tokio::test]
async fn test_serve_fails_fast_when_storage_is_unusable() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the counter file should be.
    let blocked = dir.path().join("counter.json");
    std::fs::create_dir(&blocked).unwrap();

    let mut config = common::test_config("*");
    config.storage.url = format!("file://{}", blocked.display());

    let result = tokio::time::timeout(Duration::from_secs(5), serve(&config))
        .await
        .expect("serve should not start listening");
    assert!(result.is_err());
}

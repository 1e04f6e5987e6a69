//! Redis backend tests. Need a live server:
//!
//! ```text
//! REDIS_URL=redis://127.0.0.1:6379 cargo test --test redis_store -- --ignored
//! ```

use std::sync::Arc;

use counter_app::store::{CounterStore, Delta, RedisStore, StoreError};

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

fn unique_prefix(name: &str) -> String {
    format!("counter-test-{}-{}", name, std::process::id())
}

async fn delete_key(key: &str) {
    let client = redis::Client::open(redis_url()).unwrap();
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    let _: () = redis::cmd("DEL").arg(key).query_async(&mut conn).await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running Redis server (REDIS_URL)"]
async fn test_redis_sequence_and_idempotent_init() {
    let store = RedisStore::connect(&redis_url(), &unique_prefix("seq"))
        .await
        .unwrap();
    delete_key(store.key()).await;

    store.ensure_initialized().await.unwrap();
    assert_eq!(store.get_value().await.unwrap(), 0);
    assert_eq!(store.increment().await.unwrap(), 1);
    assert_eq!(store.increment().await.unwrap(), 2);
    assert_eq!(store.decrement().await.unwrap(), 1);

    store.ensure_initialized().await.unwrap();
    assert_eq!(store.get_value().await.unwrap(), 1);

    delete_key(store.key()).await;
    let err = store.apply(Delta::Increment).await.unwrap_err();
    assert!(matches!(err, StoreError::InvariantViolation { .. }));
}

#[tokio::test]
#[ignore = "requires a running Redis server (REDIS_URL)"]
async fn test_redis_overflow_is_rejected_and_value_kept() {
    let store = RedisStore::connect(&redis_url(), &unique_prefix("overflow"))
        .await
        .unwrap();
    delete_key(store.key()).await;
    store.ensure_initialized().await.unwrap();

    let client = redis::Client::open(redis_url()).unwrap();
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    let _: () = redis::cmd("HSET")
        .arg(store.key())
        .arg("value")
        .arg(i64::MAX)
        .query_async(&mut conn)
        .await
        .unwrap();

    let err = store.increment().await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Overflow { value, delta: 1 } if value == i64::MAX
    ));
    assert_eq!(store.get_value().await.unwrap(), i64::MAX);
    assert_eq!(store.decrement().await.unwrap(), i64::MAX - 1);

    delete_key(store.key()).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a running Redis server (REDIS_URL)"]
async fn test_redis_concurrent_updates_are_not_lost() {
    let store = Arc::new(
        RedisStore::connect(&redis_url(), &unique_prefix("concurrent"))
            .await
            .unwrap(),
    );
    delete_key(store.key()).await;
    store.ensure_initialized().await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..100 {
        let store = Arc::clone(&store);
        let delta = if i % 5 == 0 {
            Delta::Decrement
        } else {
            Delta::Increment
        };
        tasks.push(tokio::spawn(async move { store.apply(delta).await }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    // 80 increments, 20 decrements
    assert_eq!(store.get_value().await.unwrap(), 60);
    delete_key(store.key()).await;
}

#[tokio::test]
async fn test_unreachable_redis_is_unavailable() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let result = RedisStore::connect(&format!("redis://127.0.0.1:{}", port), "counter").await;
    assert!(matches!(result, Err(StoreError::Unavailable { .. })));
}

//! Request worker: every command produces exactly one completion intent.

mod common;

use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::time::Duration;

use counter_app::client::CounterClient;
use counter_app::store::{CounterStore, Delta, MemoryStore};
use counter_app::ui::app::{App, UiCommand};
use counter_app::ui::counter::CounterIntent;
use counter_app::ui::events::AppEvent;
use counter_app::ui::worker::{execute, run_worker};
use tokio::sync::mpsc;

fn next_intent(rx: &std_mpsc::Receiver<AppEvent>) -> CounterIntent {
    match rx.recv_timeout(Duration::from_secs(5)) {
        Ok(AppEvent::Counter(intent)) => intent,
        Ok(_) => panic!("unexpected non-counter event"),
        Err(err) => panic!("no completion intent: {err}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_mutation_success_reports_new_value() {
    let store: Arc<dyn CounterStore> = Arc::new(MemoryStore::with_value(5));
    let (addr, handle) = common::spawn_server(store).await;
    let client = CounterClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();

    let (tx, rx) = std_mpsc::channel();
    execute(&client, UiCommand::Mutate(Delta::Increment), tx).await;
    assert_eq!(next_intent(&rx), CounterIntent::MutationSucceeded { value: 6 });
    assert!(rx.try_recv().is_err());

    handle.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server_error_reports_failure() {
    let (addr, handle) = common::spawn_server(Arc::new(common::OfflineStore)).await;
    let client = CounterClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();

    let (tx, rx) = std_mpsc::channel();
    execute(&client, UiCommand::Fetch, tx.clone()).await;
    assert_eq!(next_intent(&rx), CounterIntent::FetchFailed);

    execute(&client, UiCommand::Mutate(Delta::Decrement), tx).await;
    assert_eq!(
        next_intent(&rx),
        CounterIntent::MutationFailed {
            delta: Delta::Decrement
        }
    );

    handle.shutdown();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancelled_request_still_clears_loading() {
    // Accepts connections but never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hold = tokio::spawn(async move {
        let mut sockets = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            sockets.push(socket);
        }
    });

    let client = CounterClient::new(&format!("http://{}", addr), Duration::from_secs(30)).unwrap();
    let mut app = App::new(client.base_url());
    app.dispatch(CounterIntent::MutationStarted {
        delta: Delta::Increment,
    });
    assert!(app.counter().loading);

    let (tx, rx) = std_mpsc::channel();
    let request = tokio::spawn(async move {
        execute(&client, UiCommand::Mutate(Delta::Increment), tx).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    request.abort();

    let intent = tokio::task::spawn_blocking(move || next_intent(&rx))
        .await
        .unwrap();
    app.dispatch(intent);
    assert!(!app.counter().loading);
    assert_eq!(
        app.counter().error.as_deref(),
        Some("Unable to increment counter")
    );

    hold.abort();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_worker_drains_commands_until_channel_closes() {
    let store: Arc<dyn CounterStore> = Arc::new(MemoryStore::with_value(0));
    let (addr, handle) = common::spawn_server(store).await;
    let client = CounterClient::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();

    let (command_tx, command_rx) = mpsc::channel(4);
    let (event_tx, event_rx) = std_mpsc::channel();
    let worker = tokio::spawn(run_worker(client, command_rx, event_tx));

    command_tx.send(UiCommand::Fetch).await.unwrap();
    let intent = tokio::task::spawn_blocking(move || next_intent(&event_rx))
        .await
        .unwrap();
    assert_eq!(intent, CounterIntent::FetchSucceeded { value: 0 });

    drop(command_tx);
    tokio::time::timeout(Duration::from_secs(5), worker)
        .await
        .expect("worker should exit once commands close")
        .unwrap();

    handle.shutdown();
}

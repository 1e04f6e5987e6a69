use std::sync::mpsc as std_mpsc;

use scopeguard::ScopeGuard;
use tokio::sync::mpsc;

use crate::client::CounterClient;
use crate::ui::app::UiCommand;
use crate::ui::counter::CounterIntent;
use crate::ui::events::AppEvent;

/// Drain UI commands, running each request as its own task.
pub async fn run_worker(
    client: CounterClient,
    mut commands: mpsc::Receiver<UiCommand>,
    events: std_mpsc::Sender<AppEvent>,
) {
    while let Some(command) = commands.recv().await {
        let client = client.clone();
        let events = events.clone();
        tokio::spawn(async move { execute(&client, command, events).await });
    }
    tracing::debug!("UI command channel closed");
}

/// Run one command and report exactly one completion intent.
///
/// The failure intent is armed in a drop guard before the request starts, so
/// it is still delivered if this future is cancelled or the request panics.
pub async fn execute(client: &CounterClient, command: UiCommand, events: std_mpsc::Sender<AppEvent>) {
    let fallback = match command {
        UiCommand::Fetch => CounterIntent::FetchFailed,
        UiCommand::Mutate(delta) => CounterIntent::MutationFailed { delta },
    };
    let guard = scopeguard::guard((events, fallback), |(events, intent)| {
        let _ = events.send(AppEvent::Counter(intent));
    });

    let outcome = match command {
        UiCommand::Fetch => match client.fetch().await {
            Ok(value) => CounterIntent::FetchSucceeded { value },
            Err(err) => {
                tracing::warn!(error = %err, "Fetching counter failed");
                CounterIntent::FetchFailed
            }
        },
        UiCommand::Mutate(delta) => match client.apply(delta).await {
            Ok(value) => CounterIntent::MutationSucceeded { value },
            Err(err) => {
                tracing::warn!(?delta, error = %err, "Updating counter failed");
                CounterIntent::MutationFailed { delta }
            }
        },
    };

    let (events, _) = ScopeGuard::into_inner(guard);
    let _ = events.send(AppEvent::Counter(outcome));
}

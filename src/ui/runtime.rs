use std::io;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::client::CounterClient;
use crate::config::Config;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::ui::worker::run_worker;

const TICK_RATE: Duration = Duration::from_millis(250);
const COMMAND_QUEUE: usize = 16;

/// Run the counter screen until the user quits.
///
/// Terminal input and drawing stay on the calling thread; HTTP requests run
/// on `runtime` and report back through the event channel.
pub fn run(config: &Config, runtime: &tokio::runtime::Handle) -> io::Result<()> {
    let client = CounterClient::from_config(config)
        .map_err(|err| io::Error::other(err.to_string()))?;
    tracing::info!(api_url = %client.base_url(), "Starting counter UI");

    let (mut terminal, guard) = setup_terminal()?;
    let events = EventHandler::new(TICK_RATE);

    let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE);
    let worker = runtime.spawn(run_worker(client.clone(), command_rx, events.sender()));

    let mut app = App::new(client.base_url());
    app.attach_commands(command_tx);
    app.refresh();

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(TICK_RATE) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Counter(intent)) => app.dispatch(intent),
            Ok(AppEvent::Resize(_, _)) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    worker.abort();
    drop(guard);
    tracing::info!("Counter UI closed");
    Ok(())
}

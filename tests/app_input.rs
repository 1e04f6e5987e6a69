//! Key handling and request gating in the terminal app.

use counter_app::store::Delta;
use counter_app::ui::app::{App, Button, UiCommand};
use counter_app::ui::counter::CounterIntent;
use counter_app::ui::input::handle_key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn connected_app() -> (App, mpsc::Receiver<UiCommand>) {
    let (tx, rx) = mpsc::channel(8);
    let mut app = App::new("http://localhost:3001");
    app.attach_commands(tx);
    (app, rx)
}

#[test]
fn test_increment_key_queues_request_and_disables_controls() {
    let (mut app, mut rx) = connected_app();

    handle_key(&mut app, key(KeyCode::Char('+')));
    assert!(app.counter().loading);
    assert_eq!(rx.try_recv().unwrap(), UiCommand::Mutate(Delta::Increment));

    // Second press while in flight is ignored.
    handle_key(&mut app, key(KeyCode::Char('+')));
    handle_key(&mut app, key(KeyCode::Down));
    handle_key(&mut app, key(KeyCode::Char('r')));
    assert!(rx.try_recv().is_err());

    app.dispatch(CounterIntent::MutationSucceeded { value: 1 });
    assert!(!app.counter().loading);
    assert_eq!(app.counter().value, 1);

    handle_key(&mut app, key(KeyCode::Down));
    assert_eq!(rx.try_recv().unwrap(), UiCommand::Mutate(Delta::Decrement));
}

#[test]
fn test_refresh_does_not_disable_controls() {
    let (mut app, mut rx) = connected_app();

    handle_key(&mut app, key(KeyCode::F(5)));
    assert_eq!(rx.try_recv().unwrap(), UiCommand::Fetch);
    assert!(!app.counter().loading);
}

#[test]
fn test_unavailable_worker_reports_failure_immediately() {
    let mut app = App::new("http://localhost:3001");
    assert!(app.mutate(Delta::Increment));
    assert!(!app.counter().loading);
    assert_eq!(
        app.counter().error.as_deref(),
        Some("Unable to increment counter")
    );

    let (mut app, rx) = connected_app();
    drop(rx);
    assert!(app.refresh());
    assert_eq!(app.counter().error.as_deref(), Some("Unable to load counter"));
}

#[test]
fn test_focus_cycles_and_enter_presses_focused_button() {
    let (mut app, mut rx) = connected_app();
    assert_eq!(app.focus(), Button::Increment);

    handle_key(&mut app, key(KeyCode::Right));
    assert_eq!(app.focus(), Button::Refresh);
    handle_key(&mut app, key(KeyCode::Tab));
    assert_eq!(app.focus(), Button::Decrement);
    handle_key(&mut app, key(KeyCode::Left));
    assert_eq!(app.focus(), Button::Refresh);
    handle_key(&mut app, key(KeyCode::BackTab));
    assert_eq!(app.focus(), Button::Increment);
    handle_key(&mut app, key(KeyCode::Left));
    assert_eq!(app.focus(), Button::Decrement);

    handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(rx.try_recv().unwrap(), UiCommand::Mutate(Delta::Decrement));
}

#[test]
fn test_quit_keys() {
    for event in [
        key(KeyCode::Char('q')),
        key(KeyCode::Esc),
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    ] {
        let mut app = App::new("http://localhost:3001");
        handle_key(&mut app, event);
        assert!(app.should_quit());
    }
}

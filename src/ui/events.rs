use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::ui::counter::CounterIntent;

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Result of a request issued by the worker.
    Counter(CounterIntent),
}

/// Terminal input reader running on its own thread, plus the channel the
/// request worker reports back on.
pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    pub fn new(poll_interval: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let event_tx = tx.clone();
        let stop = Arc::new(AtomicBool::new(false));
        let thread_stop = Arc::clone(&stop);

        thread::spawn(move || {
            while !thread_stop.load(Ordering::Relaxed) {
                match event::poll(poll_interval) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(err) => {
                        tracing::error!(error = %err, "Terminal poll failed");
                        break;
                    }
                }

                let forwarded = match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        event_tx.send(AppEvent::Key(key))
                    }
                    Ok(Event::Resize(cols, rows)) => event_tx.send(AppEvent::Resize(cols, rows)),
                    Ok(_) => Ok(()),
                    Err(err) => {
                        tracing::error!(error = %err, "Terminal read failed");
                        break;
                    }
                };
                if forwarded.is_err() {
                    break;
                }
            }
        });

        Self { rx, tx, stop }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

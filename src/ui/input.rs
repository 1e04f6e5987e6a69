use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::store::Delta;
use crate::ui::app::App;

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.request_quit(),
        KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
            app.mutate(Delta::Increment);
        }
        KeyCode::Char('-') | KeyCode::Down => {
            app.mutate(Delta::Decrement);
        }
        KeyCode::Char('r') | KeyCode::F(5) => {
            app.refresh();
        }
        KeyCode::Left | KeyCode::BackTab => app.focus_prev(),
        KeyCode::Right | KeyCode::Tab => app.focus_next(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.press(app.focus());
        }
        _ => {}
    }
}

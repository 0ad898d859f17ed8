//! Input handling and the message loop's update function.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::models::CandleRequest;
use crate::models::candle::CandleSeries;

use super::app::{AVAILABLE_SYMBOLS, App, DateWindow, FetchState, Focus};

/// Terminal-side events feeding the update loop.
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Periodic heartbeat, used to age out transient state.
    Tick,
}

/// Everything the update loop can receive.
#[derive(Debug)]
pub enum Message {
    Input(Event),
    /// A fetch task finished successfully.
    Fetched {
        request: CandleRequest,
        series: CandleSeries,
    },
    /// A fetch task failed.
    FetchFailed {
        request: CandleRequest,
        error: String,
    },
}

/// Actions that require external handling (spawning a fetch task).
#[derive(Debug)]
pub enum Action {
    /// Fetch candles for the given request.
    Fetch(CandleRequest),
}

/// Spawns a task that forwards terminal input to the message channel.
///
/// Crossterm's poll/read API is blocking, so each poll runs on a blocking
/// thread; key and resize events are forwarded, everything else is dropped.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            let event = match tokio::task::spawn_blocking(poll_next_event).await {
                Ok(Some(CrosstermEvent::Key(key))) => Event::Key(key),
                Ok(Some(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(Message::Input(event)).is_err() {
                break;
            }
        }
    });
}

/// Waits up to 50ms for one crossterm event.
fn poll_next_event() -> Option<CrosstermEvent> {
    if event::poll(Duration::from_millis(50)).unwrap_or(false) {
        event::read().ok()
    } else {
        None
    }
}

/// Spawns the periodic tick that ages out transient status messages.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            ticker.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Applies one message to the app, possibly yielding follow-up work.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::Fetched { request, series } => {
            // Results for a request the user has moved away from are dropped.
            if request == app.current_request() {
                app.apply_series(series);
            }
            None
        }
        Message::FetchFailed { request, error } => {
            if request == app.current_request() {
                app.fetch_state = FetchState::Failed;
                app.show_error(error);
            }
            None
        }
    }
}

/// Routes an input event to the right handler.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_errors();
            None
        }
    }
}

/// Keys that work everywhere, then mode-specific dispatch.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() && !app.selector_open => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Esc => {
            app.selector_open = false;
            return None;
        }
        _ => {}
    }

    if app.selector_open {
        handle_selector_keys(app, key)
    } else {
        handle_normal_keys(app, key)
    }
}

/// Handles keys while the symbol selector overlay is open.
fn handle_selector_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.selector_next();
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.selector_prev();
            None
        }
        KeyCode::Enter => {
            if let Some(symbol) = AVAILABLE_SYMBOLS.get(app.selector_index) {
                app.symbol = (*symbol).to_string();
                app.selector_open = false;
                return Some(Action::Fetch(app.begin_fetch()));
            }
            None
        }
        _ => None,
    }
}

/// Handles keys on the main screen.
fn handle_normal_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        // Symbol selector
        KeyCode::Char('s') => {
            app.selector_open = true;
            // Cursor follows the active symbol when reopening.
            if let Some(index) = AVAILABLE_SYMBOLS.iter().position(|s| *s == app.symbol) {
                app.selector_index = index;
            }
            None
        }

        // Chart style
        KeyCode::Char('g') => {
            app.chart_type.toggle();
            None
        }

        // Refetch the current range
        KeyCode::Char('r') => Some(Action::Fetch(app.begin_fetch())),

        // Window presets
        KeyCode::Char('1') => {
            app.set_window(DateWindow::D7);
            Some(Action::Fetch(app.begin_fetch()))
        }
        KeyCode::Char('2') => {
            app.set_window(DateWindow::D30);
            Some(Action::Fetch(app.begin_fetch()))
        }
        KeyCode::Char('3') => {
            app.set_window(DateWindow::D90);
            Some(Action::Fetch(app.begin_fetch()))
        }
        KeyCode::Char('4') => {
            app.set_window(DateWindow::D365);
            Some(Action::Fetch(app.begin_fetch()))
        }

        // Panel focus
        KeyCode::Tab
        | KeyCode::Char('h')
        | KeyCode::Char('l')
        | KeyCode::Left
        | KeyCode::Right => {
            app.focus.toggle();
            None
        }

        // Table scrolling
        KeyCode::Char('j') | KeyCode::Down => {
            if app.focus == Focus::Table {
                app.scroll_table_down();
            }
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if app.focus == Focus::Table {
                app.scroll_table_up();
            }
            None
        }

        _ => None,
    }
}

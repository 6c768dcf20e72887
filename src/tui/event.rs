//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent};
use tokio::sync::{mpsc, watch};

use crate::feed::PriceState;
use crate::order_entry::Position;

use super::app::{App, Focus, Mode};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// The price feed published a new state.
    PriceUpdated,
}

/// Actions that require external handling.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Submit the current order draft.
    SubmitOrder,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Spawns a task that forwards price feed updates as redraw messages.
pub fn spawn_price_watcher(
    mut price: watch::Receiver<PriceState>,
    tx: mpsc::UnboundedSender<Message>,
) {
    tokio::spawn(async move {
        while price.changed().await.is_ok() {
            if tx.send(Message::PriceUpdated).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::PriceUpdated => None,
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_notices();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Global keys (work in any mode)
    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() && app.mode == Mode::Normal => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            return None;
        }
        _ => {}
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
        Mode::Confirm => handle_confirm_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return None;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.previous();
            return None;
        }
        // Direct instrument selection
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                app.select_instrument(digit as usize - 1);
            }
            return None;
        }
        _ => {}
    }

    match app.focus {
        Focus::Sidebar => handle_sidebar_keys(app, key),
        Focus::Position => handle_position_keys(app, key),
        Focus::OrderType => {
            if matches!(
                key.code,
                KeyCode::Char(' ' | 'h' | 'l') | KeyCode::Left | KeyCode::Right | KeyCode::Enter
            ) {
                let mut order_type = app.order.draft().order_type;
                order_type.toggle();
                app.order.set_order_type(order_type);
            }
            None
        }
        Focus::Price | Focus::CryptoAmount | Focus::UsdAmount => {
            if matches!(key.code, KeyCode::Char('i') | KeyCode::Enter) {
                app.begin_edit();
            }
            None
        }
        Focus::BuyingPower => handle_buying_power_keys(app, key),
        Focus::Confirm => {
            if key.code == KeyCode::Enter {
                app.mode = Mode::Confirm;
            }
            None
        }
    }
}

/// Handles keys for the instrument list.
fn handle_sidebar_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        _ => {}
    }
    None
}

/// Handles keys for the long/short tabs.
fn handle_position_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.set_position(Position::Long),
        KeyCode::Char('l') | KeyCode::Right => app.set_position(Position::Short),
        KeyCode::Char(' ') | KeyCode::Enter => {
            let mut position = app.order.draft().position;
            position.toggle();
            app.set_position(position);
        }
        _ => {}
    }
    None
}

/// Handles keys for the buying-power slider.
fn handle_buying_power_keys(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.order.adjust_buying_power(-1),
        KeyCode::Char('l') | KeyCode::Right => app.order.adjust_buying_power(1),
        KeyCode::Char('H') | KeyCode::PageDown => app.order.adjust_buying_power(-10),
        KeyCode::Char('L') | KeyCode::PageUp => app.order.adjust_buying_power(10),
        KeyCode::Home => app.order.set_buying_power(0),
        KeyCode::End => app.order.set_buying_power(100),
        _ => {}
    }
    None
}

/// Handles keys in insert mode (text input).
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    if !app.focus.is_text_field() {
        app.mode = Mode::Normal;
        return None;
    }

    match key.code {
        KeyCode::Enter => {
            app.mode = Mode::Normal;
            return None;
        }
        KeyCode::Char(c) => app.editor.insert(c),
        KeyCode::Backspace => app.editor.backspace(),
        KeyCode::Delete => app.editor.delete(),
        KeyCode::Left => app.editor.move_left(),
        KeyCode::Right => app.editor.move_right(),
        KeyCode::Home => app.editor.move_home(),
        KeyCode::End => app.editor.move_end(),
        _ => return None,
    }

    app.apply_editor();
    None
}

/// Handles keys in confirm mode.
fn handle_confirm_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.mode = Mode::Normal;
            Some(Action::SubmitOrder)
        }
        KeyCode::Char('n') => {
            app.mode = Mode::Normal;
            None
        }
        _ => None,
    }
}

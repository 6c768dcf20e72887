//! Terminal dashboard.
//!
//! Renders the instrument sidebar, the price overview and the order form
//! with Ratatui, and maps key presses onto the selection store and the
//! order entry state machine.

pub mod app;
pub mod components;
pub mod event;
pub mod format;
pub mod input;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;

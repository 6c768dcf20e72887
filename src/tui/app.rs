//! Application state for the TUI.

use std::time::{Duration, Instant};

use tokio::sync::watch;

use crate::feed::PriceState;
use crate::order_entry::{OrderEntry, Position};
use crate::store::{SelectionState, SelectionStore};

use super::input::TextInput;

/// How long a notice stays in the status bar.
const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Central application state container.
pub struct App {
    /// Shared selection; the price feed follows it.
    pub store: SelectionStore,
    /// Latest price state published by the feed.
    pub price: watch::Receiver<PriceState>,
    /// Order form.
    pub order: OrderEntry,

    // -- UI State --
    /// Widget receiving key presses in normal mode.
    pub focus: Focus,
    /// Current input mode.
    pub mode: Mode,
    /// Edit buffer for the focused text field while in insert mode.
    pub editor: TextInput,
    /// Message to display (clears after timeout).
    pub notice: Option<Notice>,

    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates a new App over a selection store and a price feed receiver.
    pub fn new(store: SelectionStore, price: watch::Receiver<PriceState>) -> Self {
        Self {
            store,
            price,
            order: OrderEntry::new(),
            focus: Focus::Sidebar,
            mode: Mode::Normal,
            editor: TextInput::new(),
            notice: None,
            should_quit: false,
        }
    }

    /// Returns a snapshot of the selection.
    pub fn selection(&self) -> SelectionState {
        self.store.state()
    }

    /// Returns the price state to display for the current selection.
    pub fn price_state(&self) -> PriceState {
        self.price_for(&self.selection())
    }

    /// Returns the latest price state if it belongs to `selection`.
    ///
    /// Until the feed has caught up with a selection change the published
    /// state still describes the previous instrument; the placeholder for
    /// the newly selected one is returned instead.
    pub fn price_for(&self, selection: &SelectionState) -> PriceState {
        let state = self.price.borrow();
        if state.generation == selection.generation {
            state.clone()
        } else {
            PriceState::pending(&selection.selected().symbol, selection.generation)
        }
    }

    /// Selects the instrument at `index`, reporting rejected indices.
    pub fn select_instrument(&mut self, index: usize) {
        if let Err(e) = self.store.set_selected_index(index) {
            self.show_error(e.to_string());
        }
    }

    /// Moves the selection one instrument down, stopping at the last one.
    pub fn select_next(&mut self) {
        let state = self.store.state();
        if state.selected_index + 1 < state.instruments.len() {
            self.select_instrument(state.selected_index + 1);
        }
    }

    /// Moves the selection one instrument up, stopping at the first one.
    pub fn select_previous(&mut self) {
        let index = self.store.state().selected_index;
        if index > 0 {
            self.select_instrument(index - 1);
        }
    }

    /// Returns the text of the focused field, if it is a text field.
    pub fn focused_text(&self) -> Option<&str> {
        let draft = self.order.draft();
        match self.focus {
            Focus::Price => Some(&draft.price_input),
            Focus::CryptoAmount => Some(&draft.crypto_amount),
            Focus::UsdAmount => Some(&draft.usd_amount),
            _ => None,
        }
    }

    /// Enters insert mode on the focused text field.
    pub fn begin_edit(&mut self) {
        if let Some(text) = self.focused_text().map(str::to_string) {
            self.editor = TextInput::with_text(&text);
            self.mode = Mode::Insert;
        }
    }

    /// Copies the edit buffer into the focused field.
    pub fn apply_editor(&mut self) {
        let text = self.editor.as_str().to_string();
        match self.focus {
            Focus::Price => self.order.set_price_input(text),
            Focus::CryptoAmount => self.order.set_crypto_amount(text),
            Focus::UsdAmount => self.order.set_usd_amount(text),
            _ => {}
        }
    }

    /// Sets the position side.
    pub fn set_position(&mut self, position: Position) {
        self.order.set_position(position);
    }

    /// Sets an informational message to display.
    pub fn show_info(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::new(NoticeKind::Info, message));
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::new(NoticeKind::Error, message));
    }

    /// Clears notices older than five seconds.
    pub fn clear_stale_notices(&mut self) {
        if let Some(ref notice) = self.notice
            && notice.timestamp.elapsed() > NOTICE_TTL
        {
            self.notice = None;
        }
    }
}

/// UI focus targets, in tab order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Sidebar,
    Position,
    Price,
    OrderType,
    CryptoAmount,
    UsdAmount,
    BuyingPower,
    Confirm,
}

impl Focus {
    const ORDER: [Focus; 8] = [
        Focus::Sidebar,
        Focus::Position,
        Focus::Price,
        Focus::OrderType,
        Focus::CryptoAmount,
        Focus::UsdAmount,
        Focus::BuyingPower,
        Focus::Confirm,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Returns the next focus target, wrapping around.
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    /// Returns the previous focus target, wrapping around.
    pub fn previous(self) -> Self {
        let pos = self.position();
        Self::ORDER[pos.checked_sub(1).unwrap_or(Self::ORDER.len() - 1)]
    }

    /// Whether the target is edited in insert mode.
    pub fn is_text_field(self) -> bool {
        matches!(self, Focus::Price | Focus::CryptoAmount | Focus::UsdAmount)
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Confirm,
}

impl Mode {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Confirm => "CONFIRM",
        }
    }
}

/// Severity of a status bar notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Status bar message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// When the notice was shown.
    pub timestamp: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: Instant::now(),
        }
    }
}

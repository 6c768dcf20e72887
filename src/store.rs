//! Selection store: the instrument catalog and the selected index.
//!
//! [`SelectionStore`] is the single source of truth for which instrument
//! the dashboard is showing. Every effective selection change bumps a
//! generation token; the price feed captures that token when it starts a
//! poll cycle and drops any response whose token no longer matches.
//!
//! State lives in a [`tokio::sync::watch`] channel, so a change and its
//! generation bump are published as one value and subscribers are woken
//! before [`SelectionStore::set_selected_index`] returns.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::Result;
use crate::error::PriviTradeError;
use crate::models::{Instrument, default_catalog};

/// Read-only snapshot of the selection.
///
/// `selected_index` is always a valid index into `instruments`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionState {
    pub instruments: Arc<[Instrument]>,
    pub selected_index: usize,
    /// Incremented by one on every effective selection change.
    pub generation: u64,
}

impl SelectionState {
    /// Returns the currently selected instrument.
    pub fn selected(&self) -> &Instrument {
        &self.instruments[self.selected_index]
    }
}

/// Owner of [`SelectionState`]. Cloning yields another handle to the
/// same state.
#[derive(Clone, Debug)]
pub struct SelectionStore {
    tx: Arc<watch::Sender<SelectionState>>,
}

impl SelectionStore {
    /// Creates a store over `instruments` with the first one selected.
    ///
    /// # Errors
    ///
    /// Returns [`PriviTradeError::Config`] if the catalog is empty or
    /// contains two instruments with the same symbol.
    pub fn new(instruments: Vec<Instrument>) -> Result<Self> {
        if instruments.is_empty() {
            return Err(PriviTradeError::Config(
                "instrument catalog must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for instrument in &instruments {
            if !seen.insert(instrument.symbol.as_str()) {
                return Err(PriviTradeError::Config(format!(
                    "duplicate instrument symbol {}",
                    instrument.symbol
                )));
            }
        }

        let (tx, _rx) = watch::channel(SelectionState {
            instruments: instruments.into(),
            selected_index: 0,
            generation: 0,
        });

        Ok(Self { tx: Arc::new(tx) })
    }

    /// Creates a store over [`default_catalog`].
    pub fn with_default_catalog() -> Result<Self> {
        Self::new(default_catalog())
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> SelectionState {
        self.tx.borrow().clone()
    }

    /// Returns the currently selected instrument.
    pub fn selected_instrument(&self) -> Instrument {
        self.tx.borrow().selected().clone()
    }

    /// Returns the current generation token.
    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    /// Number of instruments in the catalog (never zero).
    pub fn len(&self) -> usize {
        self.tx.borrow().instruments.len()
    }

    /// Always `false`; a store cannot be built over an empty catalog.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Selects the instrument at `index`.
    ///
    /// Re-selecting the current index is a no-op: the generation is not
    /// bumped and subscribers are not woken.
    ///
    /// # Errors
    ///
    /// Returns [`PriviTradeError::InvalidSelection`] if `index` is out of
    /// range. The state is left untouched in that case.
    pub fn set_selected_index(&self, index: usize) -> Result<()> {
        let mut out_of_range = None;

        let changed = self.tx.send_if_modified(|state| {
            let len = state.instruments.len();
            if index >= len {
                out_of_range = Some(len);
                return false;
            }
            if index == state.selected_index {
                return false;
            }
            state.selected_index = index;
            state.generation += 1;
            true
        });

        if let Some(len) = out_of_range {
            warn!(index, len, "Rejected out-of-range selection");
            return Err(PriviTradeError::InvalidSelection { index, len });
        }

        if changed {
            let state = self.tx.borrow();
            debug!(
                symbol = %state.selected().symbol,
                generation = state.generation,
                "Selection changed"
            );
        }

        Ok(())
    }

    /// Returns a receiver that is woken on every effective selection change.
    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.tx.subscribe()
    }
}

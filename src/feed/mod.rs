//! Price feed synchronizer.
//!
//! [`PriceFeed`] keeps exactly one poll cycle alive, always bound to the
//! instrument currently selected in the [`SelectionStore`]. A cycle fetches
//! immediately and then once per period. When the selection changes the
//! cycle future is dropped, which cancels both its timer and any in-flight
//! request, and a new cycle starts for the new instrument.
//!
//! Each cycle captures the store's generation token when it starts. A
//! result is applied only if that token still equals the store's current
//! generation; late responses for a previous selection are discarded.
//!
//! Failed fetches never surface as errors: the fixed
//! [`PriceSnapshot::fallback`] is published instead, tagged
//! [`SnapshotOrigin::Fallback`] so the UI and logs can tell it apart from
//! live data.

pub mod source;

use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::Result;
use crate::models::PriceSnapshot;
use crate::store::{SelectionState, SelectionStore};

pub use source::{HttpPriceSource, PriceSource};

/// Where the currently published snapshot came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnapshotOrigin {
    /// Placeholder published before the first fetch of a selection resolves.
    #[default]
    Pending,
    /// A successful fetch.
    Live,
    /// A failed fetch replaced by the fallback snapshot.
    Fallback,
}

impl SnapshotOrigin {
    /// Returns a display string for the origin.
    pub fn label(&self) -> &'static str {
        match self {
            SnapshotOrigin::Pending => "Loading",
            SnapshotOrigin::Live => "Live",
            SnapshotOrigin::Fallback => "Fallback",
        }
    }
}

/// The snapshot currently shown for the selected instrument.
///
/// Published as a whole on every update, so readers never observe fields
/// from two different fetches.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceState {
    /// Symbol the snapshot belongs to.
    pub symbol: String,
    /// Selection generation the snapshot was fetched under.
    pub generation: u64,
    pub snapshot: PriceSnapshot,
    pub origin: SnapshotOrigin,
    /// Failed fetches in a row for this generation; reset by a live update.
    pub consecutive_failures: u32,
    /// When the snapshot was applied; `None` for the placeholder.
    pub updated_at: Option<Instant>,
}

impl PriceState {
    /// Placeholder shown until the first fetch for `symbol` resolves.
    pub fn pending(symbol: &str, generation: u64) -> Self {
        Self {
            symbol: symbol.to_string(),
            generation,
            snapshot: PriceSnapshot::fallback(),
            origin: SnapshotOrigin::Pending,
            consecutive_failures: 0,
            updated_at: None,
        }
    }

    /// Whether the snapshot came from a successful fetch.
    pub fn is_live(&self) -> bool {
        self.origin == SnapshotOrigin::Live
    }
}

/// Handle to the background polling task.
///
/// Dropping the handle (or calling [`PriceFeed::shutdown`]) stops polling.
#[derive(Debug)]
pub struct PriceFeed {
    state: watch::Receiver<PriceState>,
    task: Option<JoinHandle<()>>,
}

impl PriceFeed {
    /// Starts polling `source` for whatever `store` has selected.
    ///
    /// A placeholder state is available from [`PriceFeed::current`] as
    /// soon as this returns. Must be called from within a Tokio runtime.
    pub fn spawn<S: PriceSource>(store: &SelectionStore, source: S, period: Duration) -> Self {
        let selection = store.subscribe();
        let initial = {
            let state = selection.borrow();
            PriceState::pending(&state.selected().symbol, state.generation)
        };
        let (tx, rx) = watch::channel(initial);

        let task = tokio::spawn(supervise(selection, source, tx, period));

        Self {
            state: rx,
            task: Some(task),
        }
    }

    /// Returns a copy of the latest published state.
    pub fn current(&self) -> PriceState {
        self.state.borrow().clone()
    }

    /// Returns a receiver woken on every published state.
    pub fn subscribe(&self) -> watch::Receiver<PriceState> {
        self.state.clone()
    }

    /// Whether the polling task is still running.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancels the active poll cycle and waits for the task to stop.
    pub async fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
            info!("Price feed stopped");
        }
    }
}

impl Drop for PriceFeed {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Runs one poll cycle per selection until every store handle is dropped.
async fn supervise<S: PriceSource>(
    mut selection: watch::Receiver<SelectionState>,
    source: S,
    tx: watch::Sender<PriceState>,
    period: Duration,
) {
    // Separate handle for generation checks; `selection` is borrowed
    // mutably by `changed()` while the cycle runs.
    let current = selection.clone();

    loop {
        let (symbol, generation) = {
            let state = selection.borrow_and_update();
            (state.selected().symbol.clone(), state.generation)
        };

        tx.send_if_modified(|state| {
            if state.generation == generation {
                return false;
            }
            *state = PriceState::pending(&symbol, generation);
            true
        });

        info!(%symbol, generation, "Starting price poll cycle");

        tokio::select! {
            () = poll_cycle(&source, &current, &tx, &symbol, generation, period) => {}
            changed = selection.changed() => {
                if changed.is_err() {
                    debug!("Selection store dropped, stopping price feed");
                    break;
                }
                debug!(%symbol, generation, "Cancelled price poll cycle");
            }
        }
    }
}

/// Fetches immediately, then once per `period`, forever.
async fn poll_cycle<S: PriceSource>(
    source: &S,
    selection: &watch::Receiver<SelectionState>,
    tx: &watch::Sender<PriceState>,
    symbol: &str,
    generation: u64,
    period: Duration,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let outcome = source.fetch(symbol).await;
        apply_outcome(selection, tx, symbol, generation, outcome);
    }
}

/// Publishes the result of a fetch issued under `generation`.
///
/// Returns `false` without touching the state if the selection has moved
/// on since the fetch was issued.
pub(crate) fn apply_outcome(
    selection: &watch::Receiver<SelectionState>,
    tx: &watch::Sender<PriceState>,
    symbol: &str,
    generation: u64,
    outcome: Result<PriceSnapshot>,
) -> bool {
    tx.send_if_modified(|state| {
        let live_generation = selection.borrow().generation;
        if generation != live_generation {
            debug!(
                %symbol,
                generation,
                live_generation,
                "Discarding stale price response"
            );
            return false;
        }

        let previous_failures = if state.generation == generation {
            state.consecutive_failures
        } else {
            0
        };

        *state = match outcome {
            Ok(snapshot) => PriceState {
                symbol: symbol.to_string(),
                generation,
                snapshot,
                origin: SnapshotOrigin::Live,
                consecutive_failures: 0,
                updated_at: Some(Instant::now()),
            },
            Err(error) => {
                let failures = previous_failures + 1;
                warn!(
                    %symbol,
                    generation,
                    failures,
                    %error,
                    "Price fetch failed, showing fallback snapshot"
                );
                PriceState {
                    symbol: symbol.to_string(),
                    generation,
                    snapshot: PriceSnapshot::fallback(),
                    origin: SnapshotOrigin::Fallback,
                    consecutive_failures: failures,
                    updated_at: Some(Instant::now()),
                }
            }
        };
        true
    })
}

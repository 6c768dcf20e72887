//! Shared test utilities: scripted price sources and snapshot builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot, watch};

use privitrade::feed::{PriceSource, PriceState};
use privitrade::models::PriceSnapshot;
use privitrade::{PriviTradeError, Result};

/// Upper bound for any single wait in async tests.
pub const WAIT: Duration = Duration::from_secs(2);

/// Poll period long enough that only the immediate fetch happens.
pub const NO_REPEAT: Duration = Duration::from_secs(3600);

/// Builds a snapshot whose fields are all derived from `price`.
pub fn snapshot(price: Decimal) -> PriceSnapshot {
    PriceSnapshot {
        price,
        price_change: Decimal::ONE,
        mark_price: price + Decimal::ONE,
        index_price: price - Decimal::ONE,
        volume_24h: price * Decimal::from(1000),
    }
}

/// Answers every fetch immediately from a fixed table. Symbols missing
/// from the table fail.
#[derive(Clone, Default)]
pub struct TableSource {
    prices: Arc<HashMap<String, PriceSnapshot>>,
    calls: Arc<AtomicUsize>,
}

impl TableSource {
    pub fn new(entries: &[(&str, PriceSnapshot)]) -> Self {
        Self {
            prices: Arc::new(
                entries
                    .iter()
                    .map(|(symbol, snapshot)| (symbol.to_string(), snapshot.clone()))
                    .collect(),
            ),
            calls: Arc::default(),
        }
    }

    /// Number of fetches issued so far, across all clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PriceSource for TableSource {
    async fn fetch(&self, symbol: &str) -> Result<PriceSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prices
            .get(symbol)
            .cloned()
            .ok_or_else(|| PriviTradeError::Io(format!("no price for {symbol}")))
    }
}

/// A fetch waiting for the test to decide its outcome.
pub struct PendingFetch {
    pub symbol: String,
    reply: oneshot::Sender<Result<PriceSnapshot>>,
}

impl PendingFetch {
    /// Resolves the fetch. Returns `false` if the requester is gone,
    /// i.e. its poll cycle was cancelled.
    pub fn resolve(self, outcome: Result<PriceSnapshot>) -> bool {
        self.reply.send(outcome).is_ok()
    }
}

/// Source whose fetches stay pending until the test resolves them.
pub struct GatedSource {
    requests: mpsc::UnboundedSender<PendingFetch>,
}

/// Returns a gated source and the stream of fetches it issues.
pub fn gated() -> (GatedSource, mpsc::UnboundedReceiver<PendingFetch>) {
    let (requests, rx) = mpsc::unbounded_channel();
    (GatedSource { requests }, rx)
}

impl PriceSource for GatedSource {
    async fn fetch(&self, symbol: &str) -> Result<PriceSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.requests
            .send(PendingFetch {
                symbol: symbol.to_string(),
                reply,
            })
            .map_err(|_| PriviTradeError::Io("test harness dropped".to_string()))?;
        rx.await
            .map_err(|_| PriviTradeError::Io("fetch abandoned".to_string()))?
    }
}

/// Waits for the next fetch issued by a gated source.
pub async fn next_fetch(requests: &mut mpsc::UnboundedReceiver<PendingFetch>) -> PendingFetch {
    tokio::time::timeout(WAIT, requests.recv())
        .await
        .expect("timed out waiting for a fetch")
        .expect("gated source dropped")
}

/// Waits until the published price state satisfies `predicate`.
pub async fn wait_for_state(
    rx: &mut watch::Receiver<PriceState>,
    predicate: impl FnMut(&PriceState) -> bool,
) -> PriceState {
    let state = tokio::time::timeout(WAIT, rx.wait_for(predicate))
        .await
        .expect("timed out waiting for price state")
        .expect("price feed dropped");
    state.clone()
}

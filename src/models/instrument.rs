//! Tradable instrument metadata and the built-in catalog.

use serde::{Deserialize, Serialize};

/// A tradable asset shown in the sidebar.
///
/// Catalog entries are unique by `symbol`; see
/// [`SelectionStore::new`](crate::store::SelectionStore::new).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Human-readable name (e.g., `"Bitcoin"`).
    pub name: String,
    /// Ticker symbol used in price requests (e.g., `"BTC"`).
    pub symbol: String,
    /// Icon reference resolved by the presentation layer.
    pub icon_ref: String,
}

impl Instrument {
    pub fn new(name: &str, symbol: &str, icon_ref: &str) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            icon_ref: icon_ref.to_string(),
        }
    }
}

/// Returns the instruments offered by the dashboard, in display order.
pub fn default_catalog() -> Vec<Instrument> {
    vec![
        Instrument::new("Bitcoin", "BTC", "/icons/btc.svg"),
        Instrument::new("Ethereum", "ETH", "/icons/eth.svg"),
        Instrument::new("Usdc", "USDC", "/icons/usdc.svg"),
        Instrument::new("Internet Computer", "ICP", "/icons/icp.svg"),
    ]
}

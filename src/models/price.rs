//! Market price snapshot returned by the price API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One complete, internally consistent set of price fields for an
/// instrument.
///
/// Wire format (`GET /api/price/{symbol}`):
///
/// ```json
/// { "price": 47382.51, "priceChange": 2.34, "markPrice": 47385.12,
///   "indexPrice": 47380.98, "volume24h": 1234567890 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    /// Last traded price.
    pub price: Decimal,
    /// 24h change in percent.
    pub price_change: Decimal,
    pub mark_price: Decimal,
    pub index_price: Decimal,
    #[serde(rename = "volume24h")]
    pub volume_24h: Decimal,
}

impl PriceSnapshot {
    /// The fixed snapshot shown when a fetch fails or before the first
    /// fetch of a selection resolves.
    pub fn fallback() -> Self {
        Self {
            price: Decimal::new(4_738_251, 2),
            price_change: Decimal::new(234, 2),
            mark_price: Decimal::new(4_738_512, 2),
            index_price: Decimal::new(4_738_098, 2),
            volume_24h: Decimal::from(1_234_567_890_u64),
        }
    }

    /// Whether the price moved up (or stayed flat) over the last 24h.
    pub fn is_up(&self) -> bool {
        self.price_change >= Decimal::ZERO
    }
}

impl Default for PriceSnapshot {
    fn default() -> Self {
        Self::fallback()
    }
}

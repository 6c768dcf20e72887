//! Read models shared by the store, the price feed and the UI.
//!
//! [`instrument`] holds the compiled-in catalog; [`price`] holds the
//! snapshot decoded from `GET /api/price/{symbol}`.

pub mod instrument;
pub mod price;

pub use instrument::{Instrument, default_catalog};
pub use price::PriceSnapshot;

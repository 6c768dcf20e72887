//! Client-side state layer for a perpetual trading dashboard.
//!
//! Tracks the selected instrument ([`store`]), keeps a polled price
//! snapshot for it ([`feed`]) and holds the order-entry form state
//! ([`order_entry`]). The [`tui`] module renders all three in a terminal.

pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod order_entry;
pub mod store;
pub mod tui;

pub use error::{PriviTradeError, Result};

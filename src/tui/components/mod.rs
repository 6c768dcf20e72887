//! Dashboard panels.

pub mod market_trades;
pub mod order_form;
pub mod overview;
pub mod sidebar;
pub mod status_bar;

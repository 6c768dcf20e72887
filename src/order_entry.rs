//! Order entry form state.
//!
//! [`OrderEntry`] owns an [`OrderDraft`] and mutates one field per user
//! action. [`OrderEntry::submit`] validates the draft, turns it into a typed
//! [`OrderTicket`] and hands it to an [`OrderExecutor`]. Submitting never
//! resets the draft.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::Result;
use crate::error::PriviTradeError;
use crate::models::Instrument;

/// Price pre-filled in a fresh form.
pub const DEFAULT_PRICE_INPUT: &str = "97001.04";

/// Upper bound of the buying-power slider.
pub const MAX_BUYING_POWER: u8 = 100;

/// Direction of the position to open.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Long,
    Short,
}

impl Position {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Position::Long => "Long",
            Position::Short => "Short",
        }
    }

    /// Toggles between long and short.
    pub fn toggle(&mut self) {
        *self = match self {
            Position::Long => Position::Short,
            Position::Short => Position::Long,
        };
    }
}

/// Execution style of the order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    #[default]
    Market,
    Limit,
}

impl OrderType {
    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            OrderType::Market => "Market",
            OrderType::Limit => "Limit",
        }
    }

    /// Toggles between market and limit.
    pub fn toggle(&mut self) {
        *self = match self {
            OrderType::Market => OrderType::Limit,
            OrderType::Limit => OrderType::Market,
        };
    }
}

/// Raw form fields as typed by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderDraft {
    pub position: Position,
    pub order_type: OrderType,
    pub price_input: String,
    pub crypto_amount: String,
    pub usd_amount: String,
    /// Always within `0..=100`.
    pub buying_power_percentage: u8,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            position: Position::default(),
            order_type: OrderType::default(),
            price_input: DEFAULT_PRICE_INPUT.to_string(),
            crypto_amount: String::new(),
            usd_amount: String::new(),
            buying_power_percentage: 0,
        }
    }
}

/// A validated order, ready for an executor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderTicket {
    pub symbol: String,
    pub position: Position,
    pub order_type: OrderType,
    /// Limit price; `None` for market orders.
    pub price: Option<Decimal>,
    pub crypto_amount: Option<Decimal>,
    pub usd_amount: Option<Decimal>,
    pub buying_power_percentage: u8,
}

/// Receives submitted orders.
pub trait OrderExecutor {
    /// Accepts `ticket` for execution.
    ///
    /// # Errors
    ///
    /// Implementations return an error if the ticket cannot be accepted.
    fn execute(&mut self, ticket: &OrderTicket) -> Result<()>;
}

/// Executor that only records and logs tickets.
#[derive(Debug, Default)]
pub struct PaperExecutor {
    submitted: Vec<OrderTicket>,
}

impl PaperExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tickets accepted so far, oldest first.
    pub fn submitted(&self) -> &[OrderTicket] {
        &self.submitted
    }
}

impl OrderExecutor for PaperExecutor {
    fn execute(&mut self, ticket: &OrderTicket) -> Result<()> {
        info!(
            symbol = %ticket.symbol,
            position = ticket.position.label(),
            order_type = ticket.order_type.label(),
            price = ?ticket.price,
            crypto_amount = ?ticket.crypto_amount,
            usd_amount = ?ticket.usd_amount,
            buying_power = ticket.buying_power_percentage,
            "Paper order accepted"
        );
        self.submitted.push(ticket.clone());
        Ok(())
    }
}

/// Order form state machine.
#[derive(Clone, Debug, Default)]
pub struct OrderEntry {
    draft: OrderDraft,
}

impl OrderEntry {
    /// Creates a form with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current draft.
    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn set_position(&mut self, position: Position) {
        self.draft.position = position;
    }

    pub fn set_order_type(&mut self, order_type: OrderType) {
        self.draft.order_type = order_type;
    }

    pub fn set_price_input(&mut self, text: impl Into<String>) {
        self.draft.price_input = text.into();
    }

    pub fn set_crypto_amount(&mut self, text: impl Into<String>) {
        self.draft.crypto_amount = text.into();
    }

    pub fn set_usd_amount(&mut self, text: impl Into<String>) {
        self.draft.usd_amount = text.into();
    }

    /// Sets the buying-power slider, clamped to `0..=100`.
    pub fn set_buying_power(&mut self, percentage: i32) {
        let clamped = percentage.clamp(0, i32::from(MAX_BUYING_POWER));
        self.draft.buying_power_percentage = u8::try_from(clamped).unwrap_or(MAX_BUYING_POWER);
    }

    /// Moves the buying-power slider by `delta`, clamped to `0..=100`.
    pub fn adjust_buying_power(&mut self, delta: i32) {
        let current = i32::from(self.draft.buying_power_percentage);
        self.set_buying_power(current.saturating_add(delta));
    }

    /// Label for the confirm button, e.g. `"Confirm Long"`.
    pub fn confirm_label(&self) -> String {
        format!("Confirm {}", self.draft.position.label())
    }

    /// Caption under the buying-power slider, e.g. `"25% of BP"`.
    pub fn buying_power_label(&self) -> String {
        format!("{}% of BP", self.draft.buying_power_percentage)
    }

    /// Validates the draft and builds a ticket for `instrument`.
    ///
    /// # Errors
    ///
    /// Returns [`PriviTradeError::InvalidOrder`] if a limit order has no
    /// positive price, if neither amount is a positive number, or if a
    /// non-blank field does not parse.
    pub fn ticket(&self, instrument: &Instrument) -> Result<OrderTicket> {
        let draft = &self.draft;

        let price = match draft.order_type {
            OrderType::Market => None,
            OrderType::Limit => Some(
                parse_positive("price", &draft.price_input)?.ok_or_else(|| {
                    PriviTradeError::InvalidOrder("limit orders need a price".to_string())
                })?,
            ),
        };

        let crypto_amount = parse_positive(&instrument.symbol, &draft.crypto_amount)?;
        let usd_amount = parse_positive("USD", &draft.usd_amount)?;

        if crypto_amount.is_none() && usd_amount.is_none() {
            return Err(PriviTradeError::InvalidOrder(format!(
                "enter an amount in {} or USD",
                instrument.symbol
            )));
        }

        Ok(OrderTicket {
            symbol: instrument.symbol.clone(),
            position: draft.position,
            order_type: draft.order_type,
            price,
            crypto_amount,
            usd_amount,
            buying_power_percentage: draft.buying_power_percentage,
        })
    }

    /// Validates the draft and hands the resulting ticket to `executor`.
    ///
    /// # Errors
    ///
    /// Returns the validation error from [`OrderEntry::ticket`] or the
    /// executor's error.
    pub fn submit<E: OrderExecutor>(
        &self,
        instrument: &Instrument,
        executor: &mut E,
    ) -> Result<OrderTicket> {
        let ticket = self.ticket(instrument)?;
        executor.execute(&ticket)?;
        Ok(ticket)
    }
}

/// Parses an optional positive decimal; blank input is `None`.
fn parse_positive(field: &str, raw: &str) -> Result<Option<Decimal>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = Decimal::from_str(trimmed).map_err(|_| {
        PriviTradeError::InvalidOrder(format!("{field} amount {trimmed:?} is not a number"))
    })?;

    if value <= Decimal::ZERO {
        return Err(PriviTradeError::InvalidOrder(format!(
            "{field} amount must be positive"
        )));
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_draft_matches_fresh_form() {
        let entry = OrderEntry::new();
        let draft = entry.draft();
        assert_eq!(draft.position, Position::Long);
        assert_eq!(draft.order_type, OrderType::Market);
        assert_eq!(draft.price_input, "97001.04");
        assert!(draft.crypto_amount.is_empty());
        assert!(draft.usd_amount.is_empty());
        assert_eq!(draft.buying_power_percentage, 0);
    }

    #[test]
    fn parse_positive_blank_is_none() {
        assert_eq!(parse_positive("USD", "   ").unwrap(), None);
    }

    #[test]
    fn parse_positive_trims() {
        assert_eq!(parse_positive("USD", " 12.5 ").unwrap(), Some(dec!(12.5)));
    }

    #[test]
    fn parse_positive_rejects_zero() {
        assert!(parse_positive("USD", "0").is_err());
    }

    #[test]
    fn toggles() {
        let mut position = Position::Long;
        position.toggle();
        assert_eq!(position, Position::Short);

        let mut order_type = OrderType::Market;
        order_type.toggle();
        assert_eq!(order_type, OrderType::Limit);
    }

    #[test]
    fn adjust_buying_power_saturates() {
        let mut entry = OrderEntry::new();
        entry.adjust_buying_power(-10);
        assert_eq!(entry.draft().buying_power_percentage, 0);
        entry.adjust_buying_power(i32::MAX);
        assert_eq!(entry.draft().buying_power_percentage, 100);
    }
}

//! Trade types for the matching venue.
//!
//! A trade records one side of an executed match. The matching engine creates
//! trades with only the execution core filled in; externally recorded trades
//! may additionally carry the initiator envelope.

use crate::ids::{ClientId, InstrumentId};
use crate::money::{Price, Quantity};
use crate::order::{OrderType, Side, TimeInForce};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Trade Status
// =============================================================================

/// Settlement status of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TradeStatus {
    /// Live; counts against the venue's volume limit.
    #[default]
    Open,
    /// Settled externally; the risk gate reclaims its volume and removes it.
    Retired,
}

// =============================================================================
// Initiator Envelope
// =============================================================================

/// Login and account of the party that initiated an externally recorded trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiator {
    pub login: String,
    pub account: String,
}

impl Initiator {
    pub fn new(login: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            account: account.into(),
        }
    }
}

// =============================================================================
// Trade Record
// =============================================================================

/// A record of executed volume.
///
/// Matching produces two trades per match, one per side, both at the resting
/// seller's price and always with `uploaded = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Side this record accounts for.
    pub side: Side,
    /// Execution price.
    pub price: Price,
    /// Executed volume.
    pub quantity: Quantity,
    /// Whether the trade has been uploaded downstream. Always created false.
    pub uploaded: bool,
    /// Open or Retired.
    pub status: TradeStatus,
    /// Client-assigned reference id, when seeded externally.
    pub client_id: Option<ClientId>,
    /// Order kind of the originating instruction, when seeded externally.
    pub kind: Option<OrderType>,
    /// Time-in-force of the originating instruction, when seeded externally.
    pub time_in_force: Option<TimeInForce>,
    /// Initiating party, when seeded externally.
    pub initiator: Option<Initiator>,
    /// Instrument the trade was executed on, when seeded externally.
    pub instrument: Option<InstrumentId>,
}

impl Trade {
    /// Create a trade as the matching engine does: execution core only.
    pub fn from_match(side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            side,
            price,
            quantity,
            uploaded: false,
            status: TradeStatus::Open,
            client_id: None,
            kind: None,
            time_in_force: None,
            initiator: None,
            instrument: None,
        }
    }

    /// Set the client-assigned reference id.
    pub fn with_client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Set the originating order kind.
    pub fn with_kind(mut self, kind: OrderType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the originating time-in-force.
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Set the initiating party.
    pub fn with_initiator(mut self, login: impl Into<String>, account: impl Into<String>) -> Self {
        self.initiator = Some(Initiator::new(login, account));
        self
    }

    /// Set the instrument.
    pub fn with_instrument(mut self, instrument: InstrumentId) -> Self {
        self.instrument = Some(instrument);
        self
    }

    /// Check if the trade has been retired.
    pub fn is_retired(&self) -> bool {
        self.status == TradeStatus::Retired
    }

    /// Transition Open → Retired. Returns `true` the first time only.
    pub fn retire(&mut self) -> bool {
        if self.status == TradeStatus::Retired {
            return false;
        }
        self.status = TradeStatus::Retired;
        true
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {} ({:?}, uploaded: {})",
            self.side, self.quantity, self.price, self.status, self.uploaded
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_trade_defaults() {
        let trade = Trade::from_match(Side::Buy, Price::from_float(99.5), Quantity(5));

        assert!(!trade.uploaded);
        assert_eq!(trade.status, TradeStatus::Open);
        assert!(trade.client_id.is_none());
        assert!(trade.initiator.is_none());
    }

    #[test]
    fn test_external_trade_envelope() {
        let trade = Trade::from_match(Side::Sell, Price::from_float(99.5), Quantity(10))
            .with_client_id(ClientId(456))
            .with_kind(OrderType::Market)
            .with_time_in_force(TimeInForce::Ioc)
            .with_initiator("user555", "ACC-0010")
            .with_instrument(InstrumentId(999));

        assert_eq!(trade.client_id, Some(ClientId(456)));
        assert_eq!(trade.initiator.as_ref().unwrap().login, "user555");
        assert_eq!(trade.instrument, Some(InstrumentId(999)));
    }

    #[test]
    fn test_retire_fires_once() {
        let mut trade = Trade::from_match(Side::Buy, Price::from_float(100.0), Quantity(5));

        assert!(trade.retire());
        assert!(trade.is_retired());
        assert!(!trade.retire());
    }

    #[test]
    fn test_trade_serialization_round_trip() {
        let trade = Trade::from_match(Side::Sell, Price::from_float(99.5), Quantity(10))
            .with_initiator("user555", "ACC-0010");

        let json = serde_json::to_string(&trade).unwrap();
        let back: Trade = serde_json::from_str(&json).unwrap();

        assert_eq!(trade, back);
    }
}

//! Order types for the matching venue.
//!
//! Order status is a single enumerated field with one transition
//! (Active → Filled), so an order can never be both at once.

use crate::ids::ClientId;
use crate::money::{Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Side
// =============================================================================

/// Which side of the market an order, trade, or quote is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Returns the opposite side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

// =============================================================================
// Order Type
// =============================================================================

/// Limit or market. Stored on every order; the matching pass does not
/// consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderType {
    /// Execute at the order's price or better.
    #[default]
    Limit,
    /// Execute at best available price.
    Market,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Limit => write!(f, "LIMIT"),
            OrderType::Market => write!(f, "MARKET"),
        }
    }
}

// =============================================================================
// Time-In-Force
// =============================================================================

/// How long an order remains eligible. Stored on every order; the matching
/// pass does not consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeInForce {
    /// Good-till-cancel.
    #[default]
    Gtc,
    /// Immediate-or-cancel.
    Ioc,
    /// Fill-or-kill.
    Fok,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeInForce::Gtc => write!(f, "GTC"),
            TimeInForce::Ioc => write!(f, "IOC"),
            TimeInForce::Fok => write!(f, "FOK"),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Status of an order. Exactly one of Active or Filled at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Resting and eligible for matching.
    #[default]
    Active,
    /// Fully matched; kept in the store but no longer eligible.
    Filled,
}

// =============================================================================
// Order Record
// =============================================================================

/// A resting buy/sell instruction.
///
/// `quantity` is the remaining volume: a matching pass that partially fills
/// an order writes the remainder back here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Client-assigned reference id (not unique).
    pub client_id: ClientId,
    /// Buy or Sell.
    pub side: Side,
    /// Order price. Present on market orders too; negative values are stored
    /// as-is (only quotes are price-sanitized).
    pub price: Price,
    /// Remaining volume.
    pub quantity: Quantity,
    /// Limit or market.
    pub kind: OrderType,
    /// Time-in-force policy.
    pub time_in_force: TimeInForce,
    /// Active or Filled.
    pub status: OrderStatus,
}

impl Order {
    /// Create a new active limit order with GTC time-in-force.
    pub fn new(client_id: ClientId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            client_id,
            side,
            price,
            quantity,
            kind: OrderType::Limit,
            time_in_force: TimeInForce::Gtc,
            status: OrderStatus::Active,
        }
    }

    /// Set the order kind.
    pub fn with_kind(mut self, kind: OrderType) -> Self {
        self.kind = kind;
        self
    }

    /// Set the time-in-force policy.
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }

    /// Check if the order is still eligible for matching.
    pub fn is_active(&self) -> bool {
        self.status == OrderStatus::Active
    }

    /// Check if the order has been fully matched.
    pub fn is_filled(&self) -> bool {
        self.status == OrderStatus::Filled
    }

    /// Check if this is a buy order.
    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    /// Check if this is a sell order.
    pub fn is_sell(&self) -> bool {
        self.side == Side::Sell
    }

    /// Transition Active → Filled. Returns `true` the first time only, so a
    /// fill can never be applied twice.
    pub fn mark_filled(&mut self) -> bool {
        if self.status == OrderStatus::Filled {
            return false;
        }
        self.status = OrderStatus::Filled;
        true
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ {} ({:?})",
            self.client_id, self.side, self.quantity, self.price, self.status
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
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_order_creation() {
        let order = Order::new(
            ClientId(1),
            Side::Buy,
            Price::from_float(100.0),
            Quantity(10),
        );

        assert!(order.is_active());
        assert!(order.is_buy());
        assert_eq!(order.kind, OrderType::Limit);
        assert_eq!(order.time_in_force, TimeInForce::Gtc);
    }

    #[test]
    fn test_order_builders() {
        let order = Order::new(ClientId(2), Side::Sell, Price::from_float(99.5), Quantity(5))
            .with_kind(OrderType::Market)
            .with_time_in_force(TimeInForce::Ioc);

        assert_eq!(order.kind, OrderType::Market);
        assert_eq!(order.time_in_force, TimeInForce::Ioc);
    }

    #[test]
    fn test_mark_filled_fires_once() {
        let mut order = Order::new(
            ClientId(1),
            Side::Buy,
            Price::from_float(100.0),
            Quantity(10),
        );

        assert!(order.mark_filled());
        assert!(order.is_filled());
        assert!(!order.is_active());
        // Second transition must not fire again.
        assert!(!order.mark_filled());
    }
}

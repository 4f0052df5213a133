//! Order-book snapshot types.

use crate::ids::Tick;
use crate::money::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// One entry in a book snapshot: a single order's or quote's price and volume.
/// Entries are not aggregated by price; equal prices appear as separate rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    /// Price of this entry.
    pub price: Price,
    /// Volume of this entry.
    pub quantity: Quantity,
}

/// Depth-limited view of the book at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BookSnapshot {
    /// Bid entries (highest price first).
    pub bids: Vec<BookLevel>,
    /// Ask entries (lowest price first).
    pub asks: Vec<BookLevel>,
    /// Tick the snapshot was taken on.
    pub tick: Tick,
}

impl BookSnapshot {
    /// Get the best bid price.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.first().map(|l| l.price)
    }

    /// Get the best ask price.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.first().map(|l| l.price)
    }

    /// Calculate the spread between best bid and ask.
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Calculate the mid price.
    pub fn mid_price(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(Price((bid.0 + ask.0) / 2)),
            _ => None,
        }
    }

    /// Check if both sides are empty.
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

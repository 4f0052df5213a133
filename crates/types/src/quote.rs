//! Raw price quotes.
//!
//! A quote is a price observation, not an order: it is never matched, but it
//! participates in the book snapshot when it carries a side and a quantity,
//! and it is pruned by the sanitizer when its price is negative.

use crate::ids::{ClientId, SessionSubId};
use crate::money::{Price, Quantity};
use crate::order::Side;
use serde::{Deserialize, Serialize};

/// A raw price quote. Only the price is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quoted price.
    pub price: Price,
    /// Buy or Sell, when present.
    pub side: Option<Side>,
    /// Quoted volume, when present.
    pub quantity: Option<Quantity>,
    /// Client-assigned reference id (not unique).
    pub client_id: Option<ClientId>,
    /// Trading-session sub-id. Stored, consulted by no stage.
    pub session_sub: Option<SessionSubId>,
}

impl Quote {
    /// Create a quote with side, price, and quantity.
    pub fn new(side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            price,
            side: Some(side),
            quantity: Some(quantity),
            client_id: None,
            session_sub: None,
        }
    }

    /// Create a price-only quote.
    pub fn bare(price: Price) -> Self {
        Self {
            price,
            side: None,
            quantity: None,
            client_id: None,
            session_sub: None,
        }
    }

    /// Set the client-assigned reference id.
    pub fn with_client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Set the trading-session sub-id.
    pub fn with_session_sub(mut self, session: SessionSubId) -> Self {
        self.session_sub = Some(session);
        self
    }

    /// The book entry this quote contributes, if it carries both a side and a
    /// quantity. A price-only quote is not book-eligible.
    pub fn book_entry(&self) -> Option<(Side, Price, Quantity)> {
        match (self.side, self.quantity) {
            (Some(side), Some(quantity)) => Some((side, self.price, quantity)),
            _ => None,
        }
    }
}

//! Core types for the matching venue simulation.
//!
//! This crate provides the shared data types used across the venue:
//! fixed-point prices, signed quantities, order/trade/quote records,
//! and order-book snapshot types.

mod book;
mod ids;
mod money;
mod order;
mod quote;
mod trade;

pub use book::{BookLevel, BookSnapshot};
pub use ids::{ClientId, InstrumentId, SessionSubId, Tick, PRICE_SCALE};
pub use money::{Price, Quantity};
pub use order::{Order, OrderStatus, OrderType, Side, TimeInForce};
pub use quote::Quote;
pub use trade::{Initiator, Trade, TradeStatus};

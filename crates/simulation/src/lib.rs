//! Simulation crate: the tick loop for the matching venue.
//!
//! # Architecture
//!
//! The venue runs in discrete ticks, each a fixed four-stage pass over the
//! shared entity store:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │               Venue.step()              │
//! │                                         │
//! │  1. Sanitize quotes (prune negatives)   │
//! │  2. Build book snapshot (read-only)     │
//! │  3. Evaluate risk limits (volume gate)  │
//! │  4. Run matching (if the gate allows)   │
//! │  5. Advance tick counter                │
//! │                                         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Everything is single-threaded and synchronous: each stage observes
//! exactly the store state the previous stage left behind, and the matching
//! stage sees the gate decision made earlier in the same tick.
//!
//! # Example
//!
//! ```
//! use simulation::{Venue, VenueConfig};
//! use types::{ClientId, Order, Price, Quantity, Side};
//!
//! let mut venue = Venue::new(VenueConfig::default());
//! venue.submit_order(Order::new(
//!     ClientId(1),
//!     Side::Buy,
//!     Price::from_float(100.0),
//!     Quantity(10),
//! ));
//! venue.submit_order(Order::new(
//!     ClientId(2),
//!     Side::Sell,
//!     Price::from_float(99.0),
//!     Quantity(10),
//! ));
//!
//! let report = venue.step();
//! assert_eq!(report.matching.matches, 1);
//! ```

pub mod config;
mod runner;

pub use config::VenueConfig;
pub use runner::{TickReport, Venue, VenueStats};

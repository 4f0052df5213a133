//! Identifier types for the matching venue.
//!
//! Client-assigned ids travel on orders, trades, and quotes as plain values.
//! They are not unique and are never used as lookup keys; the entity store
//! hands out its own handles.

use derive_more::{From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Constants
// =============================================================================

/// Price scale factor: 10,000 means 4 decimal places.
/// - `10000` = $1.00
/// - `1` = $0.0001 (smallest price increment)
pub const PRICE_SCALE: i64 = 10_000;

// =============================================================================
// External Reference Ids
// =============================================================================

/// Client-assigned reference id carried on orders, trades, and quotes.
///
/// Duplicate and reused values are permitted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    From,
    Into,
)]
pub struct ClientId(pub i64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.0)
    }
}

/// Instrument identifier carried on externally seeded trades.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    From,
    Into,
)]
pub struct InstrumentId(pub i64);

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Inst({})", self.0)
    }
}

/// Trading-session sub-id carried on quotes. Stored, consulted by no stage.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    From,
    Into,
)]
pub struct SessionSubId(pub i32);

impl fmt::Display for SessionSubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

// =============================================================================
// Time Types
// =============================================================================

/// Simulation tick (discrete time step, one pipeline pass).
pub type Tick = u64;

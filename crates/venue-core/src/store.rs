//! Heterogeneous entity store.
//!
//! Orders, trades, and quotes live side by side in one slot arena as a
//! tagged union, addressed by generational handles. Destroying an entity
//! bumps its slot's generation, so handles held across a destroy resolve to
//! `NoSuchEntity` instead of silently reading a reused slot.
//!
//! Iteration yields entities in slot order: insertion order, except that
//! slots freed by a destroy are reused by later inserts. That order is the
//! "discovery order" every stage observes; no stage applies any other
//! ordering key.

use serde::{Deserialize, Serialize};
use std::fmt;
use types::{Order, Quote, Trade};

use crate::error::{Result, StoreError};

// =============================================================================
// Entity Handle
// =============================================================================

/// Stable handle to an entity in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity#{}.{}", self.index, self.generation)
    }
}

// =============================================================================
// Record
// =============================================================================

/// The three kinds of trading entity the venue holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Quote(Quote),
    Order(Order),
    Trade(Trade),
}

impl Record {
    /// Kind name for diagnostics and kind-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Record::Quote(_) => "quote",
            Record::Order(_) => "order",
            Record::Trade(_) => "trade",
        }
    }
}

// =============================================================================
// Entity Store
// =============================================================================

struct Slot {
    generation: u32,
    record: Option<Record>,
}

/// Arena of trading entities.
#[derive(Default)]
pub struct EntityStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the store holds no entities.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check whether a handle resolves to a live entity.
    pub fn contains(&self, id: EntityId) -> bool {
        self.resolve(id).is_some()
    }

    /// Insert a record, returning its handle. Freed slots are reused.
    pub fn insert(&mut self, record: Record) -> EntityId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.record = Some(record);
            EntityId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                record: Some(record),
            });
            EntityId {
                index,
                generation: 0,
            }
        }
    }

    /// Insert an order.
    pub fn insert_order(&mut self, order: Order) -> EntityId {
        self.insert(Record::Order(order))
    }

    /// Insert a trade.
    pub fn insert_trade(&mut self, trade: Trade) -> EntityId {
        self.insert(Record::Trade(trade))
    }

    /// Insert a quote.
    pub fn insert_quote(&mut self, quote: Quote) -> EntityId {
        self.insert(Record::Quote(quote))
    }

    /// Remove an entity, returning its record.
    pub fn remove(&mut self, id: EntityId) -> Result<Record> {
        match self.slots.get_mut(id.index as usize) {
            Some(slot) if slot.generation == id.generation && slot.record.is_some() => {
                let record = slot.record.take();
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
                self.len -= 1;
                record.ok_or(StoreError::NoSuchEntity(id))
            }
            _ => Err(StoreError::NoSuchEntity(id)),
        }
    }

    fn resolve(&self, id: EntityId) -> Option<&Record> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.record.as_ref())
    }

    fn resolve_mut(&mut self, id: EntityId) -> Option<&mut Record> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.record.as_mut())
    }

    /// Get a record by handle.
    pub fn get(&self, id: EntityId) -> Result<&Record> {
        self.resolve(id).ok_or(StoreError::NoSuchEntity(id))
    }

    /// Get a mutable record by handle.
    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut Record> {
        self.resolve_mut(id).ok_or(StoreError::NoSuchEntity(id))
    }

    /// Get an entity as an order.
    pub fn order(&self, id: EntityId) -> Result<&Order> {
        match self.get(id)? {
            Record::Order(order) => Ok(order),
            other => Err(StoreError::KindMismatch {
                id,
                expected: "order",
                found: other.kind(),
            }),
        }
    }

    /// Get an entity as a mutable order.
    pub fn order_mut(&mut self, id: EntityId) -> Result<&mut Order> {
        match self.get_mut(id)? {
            Record::Order(order) => Ok(order),
            other => Err(StoreError::KindMismatch {
                id,
                expected: "order",
                found: other.kind(),
            }),
        }
    }

    /// Get an entity as a trade.
    pub fn trade(&self, id: EntityId) -> Result<&Trade> {
        match self.get(id)? {
            Record::Trade(trade) => Ok(trade),
            other => Err(StoreError::KindMismatch {
                id,
                expected: "trade",
                found: other.kind(),
            }),
        }
    }

    /// Get an entity as a mutable trade.
    pub fn trade_mut(&mut self, id: EntityId) -> Result<&mut Trade> {
        match self.get_mut(id)? {
            Record::Trade(trade) => Ok(trade),
            other => Err(StoreError::KindMismatch {
                id,
                expected: "trade",
                found: other.kind(),
            }),
        }
    }

    /// Get an entity as a quote.
    pub fn quote(&self, id: EntityId) -> Result<&Quote> {
        match self.get(id)? {
            Record::Quote(quote) => Ok(quote),
            other => Err(StoreError::KindMismatch {
                id,
                expected: "quote",
                found: other.kind(),
            }),
        }
    }

    /// Get an entity as a mutable quote.
    pub fn quote_mut(&mut self, id: EntityId) -> Result<&mut Quote> {
        match self.get_mut(id)? {
            Record::Quote(quote) => Ok(quote),
            other => Err(StoreError::KindMismatch {
                id,
                expected: "quote",
                found: other.kind(),
            }),
        }
    }

    /// Iterate live entities in discovery order.
    ///
    /// The view reflects store state at call time. Stages that destroy while
    /// scanning collect candidate handles first and apply removals after the
    /// scan; the borrow checker rules out the interleaved variant.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Record)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.record.as_ref().map(|record| {
                (
                    EntityId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    record,
                )
            })
        })
    }

    /// Iterate live orders in discovery order.
    pub fn orders(&self) -> impl Iterator<Item = (EntityId, &Order)> {
        self.iter().filter_map(|(id, record)| match record {
            Record::Order(order) => Some((id, order)),
            _ => None,
        })
    }

    /// Iterate live trades in discovery order.
    pub fn trades(&self) -> impl Iterator<Item = (EntityId, &Trade)> {
        self.iter().filter_map(|(id, record)| match record {
            Record::Trade(trade) => Some((id, trade)),
            _ => None,
        })
    }

    /// Iterate live quotes in discovery order.
    pub fn quotes(&self) -> impl Iterator<Item = (EntityId, &Quote)> {
        self.iter().filter_map(|(id, record)| match record {
            Record::Quote(quote) => Some((id, quote)),
            _ => None,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

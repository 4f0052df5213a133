//! Book snapshot stage.
//!
//! A read-only projection of the tradable entities: active orders plus
//! book-eligible quotes, partitioned by side, price-sorted, and truncated to
//! the requested depth per side. Trades and filled orders never appear.

use crate::store::{EntityStore, Record};
use types::{BookLevel, BookSnapshot, Side, Tick};

/// Build a depth-limited snapshot of the current book.
///
/// Bids are sorted by descending price, asks ascending. The sorts are stable,
/// so entries at the same price keep the order the store yielded them in.
pub fn build_snapshot(store: &EntityStore, depth: usize, tick: Tick) -> BookSnapshot {
    let mut bids = Vec::new();
    let mut asks = Vec::new();

    for (_, record) in store.iter() {
        let entry = match record {
            Record::Order(order) if order.is_active() => {
                Some((order.side, order.price, order.quantity))
            }
            Record::Quote(quote) => quote.book_entry(),
            _ => None,
        };

        if let Some((side, price, quantity)) = entry {
            let level = BookLevel { price, quantity };
            match side {
                Side::Buy => bids.push(level),
                Side::Sell => asks.push(level),
            }
        }
    }

    bids.sort_by(|a, b| b.price.cmp(&a.price));
    asks.sort_by(|a, b| a.price.cmp(&b.price));
    bids.truncate(depth);
    asks.truncate(depth);

    BookSnapshot { bids, asks, tick }
}

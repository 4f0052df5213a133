//! Matching stage.
//!
//! Consumes active orders in discovery order, with no price or time sort:
//! every buy is scanned against every sell, and a pair matches when the buy
//! price is at or above the sell price. Each match books two trade records
//! (one per side) at the resting seller's price. The inner scan does not stop
//! when a sell exhausts, so one buy can cross several sells in a single pass.
//!
//! Order kind and time-in-force are carried on the records but not consulted
//! here; client ids and quantity signs are not validated.

use tracing::info;

use crate::risk::RiskLimits;
use crate::store::{EntityId, EntityStore};
use types::{Price, Quantity, Side, Trade};

/// Outcome of one matching pass.
#[derive(Debug, Clone, Default)]
pub struct MatchReport {
    /// True when the pass was skipped because matching is disabled.
    pub skipped: bool,
    /// Number of matches executed.
    pub matches: usize,
    /// Trades created this pass (two per match).
    pub trades: Vec<EntityId>,
    /// Orders that transitioned to Filled this pass.
    pub filled: Vec<EntityId>,
}

/// Working copy of an order for the duration of one pass.
struct WorkingOrder {
    id: EntityId,
    price: Price,
    remaining: Quantity,
}

/// Match crossable buy/sell orders into trade records.
///
/// Remaining volume is tracked on working copies and written back to the
/// store at the end of the pass, so a partially matched order stays active
/// with its remainder.
pub fn run_matching(store: &mut EntityStore, limits: &RiskLimits) -> MatchReport {
    if !limits.matching_enabled() {
        info!("matching skipped: volume limit exceeded");
        return MatchReport {
            skipped: true,
            ..MatchReport::default()
        };
    }

    let mut buys: Vec<WorkingOrder> = Vec::new();
    let mut sells: Vec<WorkingOrder> = Vec::new();
    for (id, order) in store.orders() {
        if !order.is_active() {
            continue;
        }
        let working = WorkingOrder {
            id,
            price: order.price,
            remaining: order.quantity,
        };
        match order.side {
            Side::Buy => buys.push(working),
            Side::Sell => sells.push(working),
        }
    }

    let mut report = MatchReport::default();
    for buy in buys.iter_mut() {
        for sell in sells.iter_mut() {
            if !buy.remaining.is_positive() || !sell.remaining.is_positive() {
                continue;
            }
            if buy.price < sell.price {
                continue;
            }

            let matched = buy.remaining.min(sell.remaining);
            info!(
                buy = %buy.id,
                buy_price = %buy.price,
                sell = %sell.id,
                sell_price = %sell.price,
                volume = %matched,
                "match found"
            );

            // Both legs book at the resting seller's price.
            report
                .trades
                .push(store.insert_trade(Trade::from_match(Side::Buy, sell.price, matched)));
            report
                .trades
                .push(store.insert_trade(Trade::from_match(Side::Sell, sell.price, matched)));
            report.matches += 1;

            buy.remaining -= matched;
            sell.remaining -= matched;

            if !buy.remaining.is_positive() {
                mark_filled(store, buy.id, &mut report);
            }
            if !sell.remaining.is_positive() {
                mark_filled(store, sell.id, &mut report);
            }
        }
    }

    // Persist what this pass consumed: remaining volume goes back onto the
    // stored orders, zero included for the ones that filled.
    for working in buys.iter().chain(sells.iter()) {
        if let Ok(order) = store.order_mut(working.id) {
            order.quantity = working.remaining;
        }
    }

    report
}

fn mark_filled(store: &mut EntityStore, id: EntityId, report: &mut MatchReport) {
    if let Ok(order) = store.order_mut(id) {
        if order.mark_filled() {
            info!(entity = %id, "order filled");
            report.filled.push(id);
        }
    }
}

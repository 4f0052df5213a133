//! Risk limit gate.
//!
//! Aggregates open exposure (active orders plus unretired trades), flips the
//! venue-wide matching switch, then settles retired trades against the
//! shrinking volume budget. The budget deduction runs after the gate
//! decision: a retirement observed in this call changes the *next* call's
//! open volume, not this one's.

use tracing::{info, warn};

use crate::store::{EntityId, EntityStore};
use types::Quantity;

/// Venue-wide risk state: the volume budget and the matching switch.
///
/// Created once per venue, mutated only by [`evaluate_limits`], read by the
/// matching stage in the same tick. The budget never increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskLimits {
    volume_limit: Quantity,
    matching_enabled: bool,
}

impl RiskLimits {
    /// Create risk state with an initial volume budget. Matching starts
    /// enabled; every evaluation recomputes it.
    pub fn new(volume_limit: Quantity) -> Self {
        Self {
            volume_limit,
            matching_enabled: true,
        }
    }

    /// Current volume budget. May go negative through retirement deductions.
    pub fn volume_limit(&self) -> Quantity {
        self.volume_limit
    }

    /// Whether the matching stage may run.
    pub fn matching_enabled(&self) -> bool {
        self.matching_enabled
    }
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskReport {
    /// Σ quantity over active orders and unretired trades at evaluation time.
    pub open_volume: Quantity,
    /// The gate decision made this call.
    pub matching_enabled: bool,
    /// Retired trades settled and destroyed this call.
    pub trades_retired: usize,
    /// Total volume deducted from the budget this call.
    pub volume_reclaimed: Quantity,
}

/// Evaluate the volume gate and settle retired trades.
pub fn evaluate_limits(store: &mut EntityStore, limits: &mut RiskLimits) -> RiskReport {
    let order_volume: Quantity = store
        .orders()
        .filter(|(_, order)| order.is_active())
        .map(|(_, order)| order.quantity)
        .sum();
    let trade_volume: Quantity = store
        .trades()
        .filter(|(_, trade)| !trade.is_retired())
        .map(|(_, trade)| trade.quantity)
        .sum();
    let open_volume = order_volume + trade_volume;

    limits.matching_enabled = open_volume <= limits.volume_limit;
    info!(
        open_volume = %open_volume,
        volume_limit = %limits.volume_limit,
        "risk limits evaluated"
    );
    if !limits.matching_enabled {
        warn!(
            open_volume = %open_volume,
            volume_limit = %limits.volume_limit,
            "volume limit exceeded, matching disabled"
        );
    }

    let retired: Vec<(EntityId, Quantity)> = store
        .trades()
        .filter(|(_, trade)| trade.is_retired())
        .map(|(id, trade)| (id, trade.quantity))
        .collect();

    let mut volume_reclaimed = Quantity::ZERO;
    for (id, quantity) in &retired {
        limits.volume_limit -= *quantity;
        volume_reclaimed += *quantity;
        let _ = store.remove(*id);
        info!(
            entity = %id,
            volume = %quantity,
            new_limit = %limits.volume_limit,
            "retired trade settled, volume limit reduced"
        );
    }

    RiskReport {
        open_volume,
        matching_enabled: limits.matching_enabled,
        trades_retired: retired.len(),
        volume_reclaimed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{ClientId, Order, Price, Side, Trade};

    fn active_order(qty: i64) -> Order {
        Order::new(
            ClientId(1),
            Side::Buy,
            Price::from_float(100.0),
            Quantity(qty),
        )
    }

    #[test]
    fn test_gate_enabled_under_limit() {
        let mut store = EntityStore::new();
        store.insert_order(active_order(30));
        let mut limits = RiskLimits::new(Quantity(50));

        let report = evaluate_limits(&mut store, &mut limits);

        assert_eq!(report.open_volume, 30);
        assert!(limits.matching_enabled());
        assert_eq!(limits.volume_limit(), 50);
    }

    #[test]
    fn test_gate_disabled_over_limit() {
        let mut store = EntityStore::new();
        store.insert_order(active_order(40));
        store.insert_trade(Trade::from_match(
            Side::Sell,
            Price::from_float(99.0),
            Quantity(20),
        ));
        let mut limits = RiskLimits::new(Quantity(50));

        let report = evaluate_limits(&mut store, &mut limits);

        assert_eq!(report.open_volume, 60);
        assert!(!limits.matching_enabled());
    }

    #[test]
    fn test_filled_orders_excluded_from_open_volume() {
        let mut store = EntityStore::new();
        let mut filled = active_order(40);
        filled.mark_filled();
        store.insert_order(filled);
        store.insert_order(active_order(10));
        let mut limits = RiskLimits::new(Quantity(50));

        let report = evaluate_limits(&mut store, &mut limits);
        assert_eq!(report.open_volume, 10);
    }

    #[test]
    fn test_idempotent_without_retirements() {
        let mut store = EntityStore::new();
        store.insert_order(active_order(30));
        let mut limits = RiskLimits::new(Quantity(50));

        let first = evaluate_limits(&mut store, &mut limits);
        let second = evaluate_limits(&mut store, &mut limits);

        assert_eq!(first, second);
        assert_eq!(limits.volume_limit(), 50);
    }

    #[test]
    fn test_retirement_settles_after_gate_decision() {
        let mut store = EntityStore::new();
        let mut trade = Trade::from_match(Side::Sell, Price::from_float(99.5), Quantity(10));
        trade.retire();
        let id = store.insert_trade(trade);
        store.insert_order(active_order(45));
        let mut limits = RiskLimits::new(Quantity(50));

        // The retired trade is excluded from open volume, settled this call.
        let report = evaluate_limits(&mut store, &mut limits);
        assert_eq!(report.open_volume, 45);
        assert!(report.matching_enabled);
        assert_eq!(report.trades_retired, 1);
        assert_eq!(report.volume_reclaimed, 10);
        assert!(!store.contains(id));
        assert_eq!(limits.volume_limit(), 40);

        // The reduced budget only bites on the next evaluation.
        let next = evaluate_limits(&mut store, &mut limits);
        assert_eq!(next.open_volume, 45);
        assert!(!next.matching_enabled);
    }

    #[test]
    fn test_budget_can_go_negative() {
        let mut store = EntityStore::new();
        let mut trade = Trade::from_match(Side::Buy, Price::from_float(100.0), Quantity(80));
        trade.retire();
        store.insert_trade(trade);
        let mut limits = RiskLimits::new(Quantity(50));

        evaluate_limits(&mut store, &mut limits);
        assert_eq!(limits.volume_limit(), -30);
    }
}

//! Integration tests for the full four-stage tick pipeline.
//!
//! These follow the venue through multi-tick scenarios: crossable order
//! books, the volume gate blocking matching, and trade retirement feeding
//! back into the budget on the following tick.

use simulation::{Venue, VenueConfig};
use types::{ClientId, InstrumentId, Order, OrderType, Price, Quantity, Quote, Side, TimeInForce, Trade};

fn order(id: i64, side: Side, price: f64, qty: i64) -> Order {
    Order::new(ClientId(id), side, Price::from_float(price), Quantity(qty))
}

/// Seed scenario: four crossable orders under a volume limit of 50.
///
/// One pass matches B1×S3 (5 @ 99.5), B1×S4 (5 @ 98), then B2×S4 (5 @ 98):
/// three matches, six trade records, every order filled.
#[test]
fn test_end_to_end_matching_scenario() {
    let mut venue = Venue::new(VenueConfig::default().with_volume_limit(Quantity(50)));

    let b1 = venue.submit_order(order(1, Side::Buy, 100.0, 10));
    let b2 = venue.submit_order(order(2, Side::Buy, 99.0, 5));
    let s3 = venue.submit_order(order(3, Side::Sell, 99.5, 5));
    let s4 = venue.submit_order(order(4, Side::Sell, 98.0, 10));

    let report = venue.step();

    assert_eq!(report.risk.open_volume, 30);
    assert!(report.risk.matching_enabled);

    assert_eq!(report.matching.matches, 3);
    assert_eq!(report.matching.trades.len(), 6);
    for id in [b1, b2, s3, s4] {
        assert!(venue.store().order(id).unwrap().is_filled());
    }

    // Each match volume is 5; legs priced at the crossed seller's price.
    let prices: Vec<Price> = report
        .matching
        .trades
        .iter()
        .map(|id| venue.store().trade(*id).unwrap().price)
        .collect();
    assert_eq!(
        prices,
        vec![
            Price::from_float(99.5),
            Price::from_float(99.5),
            Price::from_float(98.0),
            Price::from_float(98.0),
            Price::from_float(98.0),
            Price::from_float(98.0),
        ]
    );
    assert!(report
        .matching
        .trades
        .iter()
        .all(|id| venue.store().trade(*id).unwrap().quantity == 5));
}

/// Over-limit exposure disables matching even with crossable orders resting.
#[test]
fn test_gate_blocks_crossable_orders() {
    let mut venue = Venue::new(VenueConfig::default().with_volume_limit(Quantity(10)));

    let buy = venue.submit_order(order(1, Side::Buy, 100.0, 20));
    let sell = venue.submit_order(order(2, Side::Sell, 99.0, 20));

    let report = venue.step();

    assert_eq!(report.risk.open_volume, 40);
    assert!(!report.risk.matching_enabled);
    assert!(report.matching.skipped);
    assert_eq!(report.matching.matches, 0);
    assert!(venue.store().order(buy).unwrap().is_active());
    assert!(venue.store().order(sell).unwrap().is_active());
    assert_eq!(venue.stats().gated_ticks, 1);
}

/// Retirement reclaims budget one tick late: the tick that settles the trade
/// still gates on the old exposure, the next tick sees the shrunken budget.
#[test]
fn test_retirement_takes_effect_next_tick() {
    let mut venue = Venue::new(VenueConfig::default().with_volume_limit(Quantity(50)));

    let trade = venue.record_trade(
        Trade::from_match(Side::Sell, Price::from_float(99.5), Quantity(10))
            .with_client_id(ClientId(456))
            .with_kind(OrderType::Market)
            .with_time_in_force(TimeInForce::Ioc)
            .with_initiator("user555", "ACC-0010")
            .with_instrument(InstrumentId(999)),
    );
    venue.submit_order(order(1, Side::Buy, 100.0, 45));

    // Tick 0: open volume 55 > 50, matching gated, nothing settled yet.
    let first = venue.step();
    assert_eq!(first.risk.open_volume, 55);
    assert!(!first.risk.matching_enabled);
    assert_eq!(venue.volume_limit(), 50);

    venue.retire_trade(trade).unwrap();

    // Tick 1: the retired trade leaves the exposure sum and is settled, but
    // the gate decision was made against the pre-deduction budget.
    let second = venue.step();
    assert_eq!(second.risk.open_volume, 45);
    assert!(second.risk.matching_enabled);
    assert_eq!(second.risk.trades_retired, 1);
    assert_eq!(second.risk.volume_reclaimed, Quantity(10));
    assert!(!venue.store().contains(trade));
    assert_eq!(venue.volume_limit(), 40);

    // Tick 2: the shrunken budget now gates the same 45 of exposure.
    let third = venue.step();
    assert_eq!(third.risk.open_volume, 45);
    assert!(!third.risk.matching_enabled);
}

/// The driver's quote ladder: the negative quote is pruned on the first
/// tick, everything else shows in the depth-5 snapshot.
#[test]
fn test_quote_ladder_snapshot() {
    let mut venue = Venue::with_defaults();

    for (price, qty, id) in [
        (99.60, 8, 2),
        (97.56, 54, 3),
        (98.333, 15, 4),
        (105.0, 23, 5),
        (100.0, 56, 6),
    ] {
        venue.submit_quote(
            Quote::new(Side::Buy, Price::from_float(price), Quantity(qty))
                .with_client_id(ClientId(id)),
        );
    }
    for (price, qty, id) in [(99.70, 5, 7), (105.70, 54, 8), (-13.70, 100, 8)] {
        venue.submit_quote(
            Quote::new(Side::Sell, Price::from_float(price), Quantity(qty))
                .with_client_id(ClientId(id)),
        );
    }

    let report = venue.step();

    assert_eq!(report.quotes_pruned, 1);
    assert_eq!(report.snapshot.bids.len(), 5);
    assert_eq!(report.snapshot.asks.len(), 2);
    assert_eq!(report.snapshot.best_bid(), Some(Price::from_float(105.0)));
    assert_eq!(report.snapshot.best_ask(), Some(Price::from_float(99.70)));

    // A second pass has nothing left to prune.
    let again = venue.step();
    assert_eq!(again.quotes_pruned, 0);
}

/// Matching leaves a partially crossed order active with its remainder, and
/// the next tick's gate sums that remainder.
#[test]
fn test_partial_fill_carries_into_next_tick() {
    let mut venue = Venue::new(VenueConfig::default().with_volume_limit(Quantity(100)));

    let buy = venue.submit_order(order(1, Side::Buy, 100.0, 10));
    let sell = venue.submit_order(order(2, Side::Sell, 99.0, 4));

    let first = venue.step();
    assert_eq!(first.matching.matches, 1);
    assert!(venue.store().order(sell).unwrap().is_filled());

    let remaining = venue.store().order(buy).unwrap();
    assert!(remaining.is_active());
    assert_eq!(remaining.quantity, 6);

    // Next tick: 6 left on the buy plus the two trade legs of 4 each.
    let second = venue.step();
    assert_eq!(second.risk.open_volume, 14);
    assert_eq!(second.matching.matches, 0);
}

/// Trades created by matching count against the gate on the following tick.
#[test]
fn test_match_output_feeds_next_gate() {
    let mut venue = Venue::new(VenueConfig::default().with_volume_limit(Quantity(25)));

    venue.submit_order(order(1, Side::Buy, 100.0, 12));
    venue.submit_order(order(2, Side::Sell, 99.0, 12));

    let first = venue.step();
    assert_eq!(first.risk.open_volume, 24);
    assert!(first.risk.matching_enabled);
    assert_eq!(first.matching.matches, 1);

    // Both orders are filled, but the two 12-volume trade legs now sit in
    // the store: 24 of exposure, still inside the budget.
    let second = venue.step();
    assert_eq!(second.risk.open_volume, 24);
    assert!(second.risk.matching_enabled);
}

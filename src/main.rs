//! Venue-sim driver binary.
//!
//! Seeds the venue with sample orders, quotes, and one externally executed
//! trade, then drives the four-stage pipeline tick by tick. The scripted
//! part mirrors a short trading session: crossable orders match on the first
//! tick, fresh orders arrive before the second, and the seeded trade is
//! retired before the third so the gate reclaims its volume.
//!
//! Stage activity is emitted through `tracing`; set `RUST_LOG=debug` to see
//! the per-tick book rendering.

mod config;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use simulation::{Venue, VenueConfig};
use types::{ClientId, InstrumentId, Order, OrderType, Price, Quantity, Quote, SessionSubId, Side,
    TimeInForce, Trade};
use venue_core::EntityId;

pub use config::DriverConfig;

/// Venue-sim - tick-driven matching venue simulation
#[derive(Parser, Debug)]
#[command(name = "venue-sim")]
#[command(about = "A tick-driven continuous double-auction matching venue simulation")]
#[command(version)]
struct Args {
    /// Total ticks to run
    #[arg(long, env = "VENUE_TICKS")]
    ticks: Option<u64>,

    /// Initial volume limit for the risk gate
    #[arg(long, env = "VENUE_VOLUME_LIMIT")]
    volume_limit: Option<i64>,

    /// Book entries rendered per side in snapshots
    #[arg(long, env = "VENUE_BOOK_DEPTH")]
    book_depth: Option<usize>,

    /// Random noise quotes injected per tick after the scripted scenario
    #[arg(long, env = "VENUE_NOISE_QUOTES")]
    noise_quotes: Option<usize>,

    /// RNG seed for noise quote generation
    #[arg(long, env = "VENUE_SEED")]
    seed: Option<u64>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

/// Seed the opening book: four crossable orders, one externally executed
/// trade awaiting settlement, and a quote ladder with one bad print.
///
/// Returns the handle of the seeded trade so the driver can retire it later.
fn seed_opening_state(venue: &mut Venue) -> EntityId {
    venue.submit_order(Order::new(
        ClientId(1),
        Side::Buy,
        Price::from_float(100.0),
        Quantity(10),
    ));
    venue.submit_order(Order::new(
        ClientId(2),
        Side::Buy,
        Price::from_float(99.0),
        Quantity(5),
    ));
    venue.submit_order(Order::new(
        ClientId(3),
        Side::Sell,
        Price::from_float(99.5),
        Quantity(5),
    ));
    venue.submit_order(Order::new(
        ClientId(4),
        Side::Sell,
        Price::from_float(98.0),
        Quantity(10),
    ));

    let trade = venue.record_trade(
        Trade::from_match(Side::Sell, Price::from_float(99.5), Quantity(10))
            .with_client_id(ClientId(456))
            .with_kind(OrderType::Market)
            .with_time_in_force(TimeInForce::Ioc)
            .with_initiator("user555", "ACC-0010")
            .with_instrument(InstrumentId(999)),
    );

    seed_quote_ladder(venue);
    trade
}

/// The sample quote ladder, including one negative-price print for the
/// sanitizer to catch.
fn seed_quote_ladder(venue: &mut Venue) {
    let buys = [(99.60, 8, 2), (97.56, 54, 3), (98.333, 15, 4), (105.0, 23, 5), (100.0, 56, 6)];
    let sells = [(99.70, 5, 7), (105.70, 54, 8), (-13.70, 100, 8)];

    for (price, qty, id) in buys {
        venue.submit_quote(
            Quote::new(Side::Buy, Price::from_float(price), Quantity(qty))
                .with_client_id(ClientId(id))
                .with_session_sub(SessionSubId(1)),
        );
    }
    for (price, qty, id) in sells {
        venue.submit_quote(
            Quote::new(Side::Sell, Price::from_float(price), Quantity(qty))
                .with_client_id(ClientId(id))
                .with_session_sub(SessionSubId(1)),
        );
    }
}

/// Fresh orders arriving after the opening tick. Client ids repeat the
/// opening ones; the venue permits that.
fn seed_second_wave(venue: &mut Venue) {
    venue.submit_order(Order::new(
        ClientId(2),
        Side::Buy,
        Price::from_float(99.0),
        Quantity(5),
    ));
    venue.submit_order(Order::new(
        ClientId(4),
        Side::Sell,
        Price::from_float(98.0),
        Quantity(10),
    ));
}

/// Inject random quotes around the last mid, for longer runs.
fn seed_noise_quotes(venue: &mut Venue, rng: &mut ChaCha8Rng, count: usize) {
    for i in 0..count {
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let price = Price::from_float(rng.gen_range(95.0..105.0));
        let quantity = Quantity(rng.gen_range(1..=50));
        venue.submit_quote(
            Quote::new(side, price, quantity).with_client_id(ClientId(100 + i as i64)),
        );
    }
}

fn main() {
    init_tracing();

    let args = Args::parse();
    let mut config = DriverConfig::default();
    if let Some(ticks) = args.ticks {
        config.ticks = ticks;
    }
    if let Some(limit) = args.volume_limit {
        config.volume_limit = limit;
    }
    if let Some(depth) = args.book_depth {
        config.book_depth = depth;
    }
    if let Some(noise) = args.noise_quotes {
        config.noise_quotes = noise;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let venue_config = VenueConfig::new()
        .with_volume_limit(Quantity(config.volume_limit))
        .with_book_depth(config.book_depth);
    let mut venue = Venue::new(venue_config);
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let seeded_trade = seed_opening_state(&mut venue);

    for tick in 0..config.ticks {
        // Scripted session: a second order wave before tick 1, settlement of
        // the seeded trade before tick 2, noise afterwards.
        match tick {
            0 => {}
            1 => seed_second_wave(&mut venue),
            2 => {
                if venue.retire_trade(seeded_trade).is_err() {
                    tracing::warn!("seeded trade already gone, nothing to retire");
                }
            }
            _ => seed_noise_quotes(&mut venue, &mut rng, config.noise_quotes),
        }

        let report = venue.step();
        tracing::info!(
            tick = report.tick,
            quotes_pruned = report.quotes_pruned,
            open_volume = %report.risk.open_volume,
            matches = report.matching.matches,
            "tick complete"
        );
    }

    let stats = venue.stats();
    eprintln!();
    eprintln!("╔════════════════════════════════════════════╗");
    eprintln!("║  Venue Session Complete                    ║");
    eprintln!("╠════════════════════════════════════════════╣");
    eprintln!("║  Ticks:           {:>8}                 ║", stats.ticks);
    eprintln!("║  Quotes pruned:   {:>8}                 ║", stats.quotes_pruned);
    eprintln!("║  Matches:         {:>8}                 ║", stats.matches);
    eprintln!("║  Trades created:  {:>8}                 ║", stats.trades_created);
    eprintln!("║  Orders filled:   {:>8}                 ║", stats.orders_filled);
    eprintln!("║  Trades retired:  {:>8}                 ║", stats.trades_retired);
    eprintln!("║  Gated ticks:     {:>8}                 ║", stats.gated_ticks);
    eprintln!("║  Volume limit:    {:>8}                 ║", venue.volume_limit());
    eprintln!("╚════════════════════════════════════════════╝");
}

//! Venue runner implementing the tick-based pipeline.
//!
//! The venue owns the entity store and the venue-wide risk state, and drives
//! the four stages in their fixed order once per tick. An external caller
//! seeds orders, quotes, and trades between ticks and invokes [`Venue::step`]
//! one tick at a time; each stage is also exposed individually for callers
//! that want to drive the pipeline by hand.

use tracing::{debug, info_span};

use types::{BookSnapshot, Order, Quantity, Quote, Tick, Trade};
use venue_core::{
    build_snapshot, evaluate_limits, run_matching, sanitize_quotes, EntityId, EntityStore,
    MatchReport, Record, Result, RiskLimits, RiskReport,
};

use crate::config::VenueConfig;

/// Cumulative statistics across a venue's lifetime.
#[derive(Debug, Clone, Default)]
pub struct VenueStats {
    /// Ticks executed so far.
    pub ticks: u64,

    /// Quotes pruned by the sanitizer.
    pub quotes_pruned: u64,

    /// Matches executed.
    pub matches: u64,

    /// Trade records created by matching (two per match).
    pub trades_created: u64,

    /// Orders that transitioned to Filled.
    pub orders_filled: u64,

    /// Retired trades settled by the risk gate.
    pub trades_retired: u64,

    /// Ticks on which matching was skipped by the gate.
    pub gated_ticks: u64,
}

/// Everything one tick produced.
#[derive(Debug, Clone)]
pub struct TickReport {
    /// The tick this report covers.
    pub tick: Tick,
    /// Quotes pruned by the sanitizer this tick.
    pub quotes_pruned: usize,
    /// Book snapshot taken after sanitation, before matching.
    pub snapshot: BookSnapshot,
    /// Risk gate outcome.
    pub risk: RiskReport,
    /// Matching outcome.
    pub matching: MatchReport,
}

/// The matching venue: entity store, risk state, and the tick pipeline.
pub struct Venue {
    config: VenueConfig,
    store: EntityStore,
    limits: RiskLimits,
    tick: Tick,
    stats: VenueStats,
}

impl Venue {
    /// Create a new venue with the given configuration.
    pub fn new(config: VenueConfig) -> Self {
        let limits = RiskLimits::new(config.volume_limit);
        Self {
            config,
            store: EntityStore::new(),
            limits,
            tick: 0,
            stats: VenueStats::default(),
        }
    }

    /// Create a venue with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(VenueConfig::default())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the venue configuration.
    pub fn config(&self) -> &VenueConfig {
        &self.config
    }

    /// Get the entity store.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Get the entity store mutably, for external seeding.
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// Current tick.
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Cumulative statistics.
    pub fn stats(&self) -> &VenueStats {
        &self.stats
    }

    /// Current volume budget.
    pub fn volume_limit(&self) -> Quantity {
        self.limits.volume_limit()
    }

    /// Whether matching is currently enabled.
    pub fn matching_enabled(&self) -> bool {
        self.limits.matching_enabled()
    }

    // =========================================================================
    // Seeding Surface
    // =========================================================================

    /// Add an order to the store.
    pub fn submit_order(&mut self, order: Order) -> EntityId {
        self.store.insert_order(order)
    }

    /// Add a quote to the store.
    pub fn submit_quote(&mut self, quote: Quote) -> EntityId {
        self.store.insert_quote(quote)
    }

    /// Add an externally executed trade to the store.
    pub fn record_trade(&mut self, trade: Trade) -> EntityId {
        self.store.insert_trade(trade)
    }

    /// Mark a trade as retired (settled). The next risk gate evaluation
    /// reclaims its volume and removes it.
    pub fn retire_trade(&mut self, id: EntityId) -> Result<()> {
        self.store.trade_mut(id)?.retire();
        Ok(())
    }

    /// Remove an entity from the store.
    pub fn destroy(&mut self, id: EntityId) -> Result<Record> {
        self.store.remove(id)
    }

    // =========================================================================
    // Stage Entry Points
    // =========================================================================

    /// Stage 1: prune negative-price quotes. Returns the number removed.
    pub fn sanitize_quotes(&mut self) -> usize {
        sanitize_quotes(&mut self.store)
    }

    /// Stage 2: build a depth-limited book snapshot. Read-only.
    pub fn book_snapshot(&self) -> BookSnapshot {
        build_snapshot(&self.store, self.config.book_depth, self.tick)
    }

    /// Stage 3: evaluate the volume gate and settle retired trades.
    pub fn evaluate_risk_limits(&mut self) -> RiskReport {
        evaluate_limits(&mut self.store, &mut self.limits)
    }

    /// Stage 4: match crossable orders, if the gate allows.
    pub fn run_matching(&mut self) -> MatchReport {
        run_matching(&mut self.store, &self.limits)
    }

    // =========================================================================
    // Tick Loop
    // =========================================================================

    /// Advance the venue by one tick: sanitize, snapshot, gate, match.
    pub fn step(&mut self) -> TickReport {
        let span = info_span!("tick", tick = self.tick);
        let _guard = span.enter();

        let quotes_pruned = self.sanitize_quotes();
        let snapshot = self.book_snapshot();
        log_snapshot(&snapshot);
        let risk = self.evaluate_risk_limits();
        let matching = self.run_matching();

        self.stats.quotes_pruned += quotes_pruned as u64;
        self.stats.matches += matching.matches as u64;
        self.stats.trades_created += matching.trades.len() as u64;
        self.stats.orders_filled += matching.filled.len() as u64;
        self.stats.trades_retired += risk.trades_retired as u64;
        if matching.skipped {
            self.stats.gated_ticks += 1;
        }

        let report = TickReport {
            tick: self.tick,
            quotes_pruned,
            snapshot,
            risk,
            matching,
        };

        self.tick += 1;
        self.stats.ticks = self.tick;
        report
    }

    /// Run the venue for a given number of ticks, collecting the reports.
    pub fn run(&mut self, ticks: u64) -> Vec<TickReport> {
        (0..ticks).map(|_| self.step()).collect()
    }
}

/// Render the book snapshot into the log, top of book first.
fn log_snapshot(snapshot: &BookSnapshot) {
    debug!(
        bids = snapshot.bids.len(),
        asks = snapshot.asks.len(),
        "book snapshot"
    );
    for level in &snapshot.bids {
        debug!(price = %level.price, volume = %level.quantity, "bid");
    }
    for level in &snapshot.asks {
        debug!(price = %level.price, volume = %level.quantity, "ask");
    }
}

//! Driver configuration.

/// Settings for the demo driver, before CLI/env overrides.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Total ticks to run.
    pub ticks: u64,

    /// Initial volume budget for the risk gate.
    pub volume_limit: i64,

    /// Book entries rendered per side in snapshots.
    pub book_depth: usize,

    /// Random noise quotes injected per tick after the scripted scenario.
    pub noise_quotes: usize,

    /// RNG seed for noise quote generation.
    pub seed: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            ticks: 3,
            volume_limit: 50,
            book_depth: 5,
            noise_quotes: 0,
            seed: 42,
        }
    }
}

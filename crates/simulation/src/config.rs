//! Venue configuration options.

use types::Quantity;

/// Configuration for the venue.
#[derive(Debug, Clone)]
pub struct VenueConfig {
    /// Initial volume budget for the risk gate.
    pub volume_limit: Quantity,

    /// Number of book entries rendered per side in snapshots.
    pub book_depth: usize,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            volume_limit: Quantity(50),
            book_depth: 5,
        }
    }
}

impl VenueConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial volume budget.
    pub fn with_volume_limit(mut self, limit: Quantity) -> Self {
        self.volume_limit = limit;
        self
    }

    /// Set the snapshot depth per side.
    pub fn with_book_depth(mut self, depth: usize) -> Self {
        self.book_depth = depth;
        self
    }
}

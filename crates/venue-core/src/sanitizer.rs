//! Quote sanitation stage.
//!
//! Removes quotes whose price is negative. Only pure quotes are eligible:
//! orders and trades keep their price untouched here, whatever its sign.
//! Deterministic and idempotent; a second pass with no new bad quotes is a
//! no-op.

use tracing::info;

use crate::store::{EntityId, EntityStore};
use types::Price;

/// Destroy every quote with a negative price. Returns the number removed.
pub fn sanitize_quotes(store: &mut EntityStore) -> usize {
    // Collect first, remove after the scan.
    let doomed: Vec<(EntityId, Price)> = store
        .quotes()
        .filter(|(_, quote)| quote.price.is_negative())
        .map(|(id, quote)| (id, quote.price))
        .collect();

    for (id, price) in &doomed {
        if store.remove(*id).is_ok() {
            info!(entity = %id, price = %price, "removing quote with negative price");
        }
    }

    doomed.len()
}

//! Error types for entity store operations.

use crate::store::EntityId;
use thiserror::Error;

/// Result type for venue-core operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur when accessing the entity store.
///
/// The pipeline stages themselves are total over well-formed store state;
/// these errors surface malformed access (stale handles, wrong-kind reads)
/// to external callers instead of leaving it undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The handle does not resolve to a live entity (never existed, already
    /// destroyed, or its slot was reused).
    #[error("no such entity: {0}")]
    NoSuchEntity(EntityId),
    /// The entity exists but is not the requested kind.
    #[error("{id} is a {found}, expected a {expected}")]
    KindMismatch {
        id: EntityId,
        expected: &'static str,
        found: &'static str,
    },
}

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by [`SymbolTable`](crate::SymbolTable) operations.
///
/// A failed operation never leaves a partially linked entry behind; the
/// table is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The table was configured with fewer than one bucket.
    #[error("invalid capacity {0}: a symbol table needs at least one bucket")]
    InvalidCapacity(usize),
    /// Memory for the bucket array, an entry, or a key copy could not be obtained.
    #[error("allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
    /// The table was modified after the cursor was created.
    #[error("symbol table was modified during iteration")]
    Modified,
    /// The cursor was advanced against a table other than the one it was created from.
    #[error("cursor used with a table it was not created from")]
    ForeignCursor,
}

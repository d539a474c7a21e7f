use std::collections::TryReserveError;

use thiserror::Error;

/// Returned by `try_reserve` when the arena cannot grow. Surfacing
/// allocation failure lets callers pre-reserve and degrade instead of
/// aborting mid-insert.
#[derive(Debug, Error)]
#[error("failed to reserve space for {requested} more entries")]
pub struct ReserveError {
    pub(crate) requested: usize,
    #[source]
    pub(crate) source: TryReserveError,
}

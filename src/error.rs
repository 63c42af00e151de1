use thiserror::Error;

/// Unified error type for the paging merge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// `consume()` was called while no record was deliverable.
    /// Re-check `ready()` or merge more sources; nothing was modified.
    #[error("iterator exhausted: no record is ready to be consumed")]
    Exhausted,
    /// The operation is not supported by a read/replay-only iterator.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
    /// Replay state was released after the sort trace outgrew its limit.
    #[error("replay unavailable: sort trace exceeded limit of {limit} records")]
    ReplayUnavailable { limit: usize },
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

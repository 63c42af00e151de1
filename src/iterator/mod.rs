pub(crate) mod heap;
pub mod merge;
pub mod passthrough;
pub mod replay;
pub mod sorted;
pub mod trace;

use crate::error::{Error, Result};
use crate::source::Source;

/// Contract shared by the paging iterators.
///
/// A paging iterator is fed pages of results as they arrive (`merge`), hands
/// out records while it is safe to do so (`ready` / `consume`), is told when
/// no more pages will come (`finish`), and can reproduce everything it has
/// emitted so far (`repeat`).
///
/// Calls are expected from a single consumer in one logical sequence. Fetching
/// more pages is up to the caller; nothing in here blocks or performs I/O.
pub trait PagingIterator {
    /// Kind of source accepted by `merge`.
    type Source: Source;
    /// Iterator returned by `repeat`.
    type Replay: Iterator<Item = <Self::Source as Source>::Item>;

    /// Add newly arrived sources.
    fn merge<I>(&mut self, sources: I)
    where
        I: IntoIterator<Item = Self::Source>;

    /// No more sources will be merged; deliver everything that is left.
    fn finish(&mut self);

    /// Whether `consume` can deliver a record right now.
    fn ready(&mut self) -> bool;

    /// Take the next record. Fails with [`Error::Exhausted`] when `ready`
    /// would return false.
    fn consume(&mut self) -> Result<<Self::Source as Source>::Item>;

    /// Reproduce the records emitted so far, in the same order.
    fn repeat(&self) -> Result<Self::Replay>;

    /// Emitted records cannot be removed.
    fn remove(&mut self) -> Result<()> {
        Err(Error::Unsupported("remove"))
    }
}

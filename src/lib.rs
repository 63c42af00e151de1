//! # Paging merge
//!
//! Result-merging core for distributed queries. Each shard returns its rows
//! sorted, one page at a time; this crate merges those pages into a single
//! globally sorted stream.
//!
//! ## Core idea
//! A k-way heap merge where sources can be added between any two records.
//! Because a shard's next page may still be in flight, the merge stops
//! handing out rows as soon as one source runs dry, until the caller either
//! merges more pages or declares the result complete with `finish`.
//!
//! The merge also records which source every emitted row came from. With
//! that trace and restartable sources, the same ordered result can be
//! replayed later without sorting again.
//!
//! Everything is single-consumer and synchronous: no locks, no I/O. Deciding
//! when to fetch the next page belongs to the caller.

pub mod error;
pub mod iterator;
pub mod options;
pub mod source;
pub mod types;

// Public re-exports for the top-level API
pub use error::{Error, Result};
pub use iterator::PagingIterator;
pub use iterator::merge::RecordingMergeIterator;
pub use iterator::passthrough::PassThroughPagingIterator;
pub use iterator::replay::Replay;
pub use iterator::sorted::SortedPagingIterator;
pub use options::{Options, TieBreak};
pub use source::{FnSource, Page, Source, from_fn};
pub use types::SourceIndex;

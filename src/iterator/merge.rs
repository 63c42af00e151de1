use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::iterator::heap::CursorHeap;
use crate::iterator::replay::Replay;
use crate::iterator::trace::SortTrace;
use crate::options::{Options, TieBreak};
use crate::source::Source;
use crate::types::SourceIndex;

/// A source being merged: its index, the next record it will yield (the
/// one-item lookahead the heap orders by) and the rest of its cursor.
struct Entry<T, C> {
    index: SourceIndex,
    head: T,
    cursor: C,
}

/// The source that produced the last record. Its next record has not been
/// pulled yet; that happens on the next readiness check.
///
/// `dry` is set when an `add` already found the cursor empty. The entry then
/// stays parked until a readiness check raises the exhaustion signal for it.
struct Pending<C> {
    index: SourceIndex,
    cursor: C,
    dry: bool,
}

/// K-way merge over a growing set of sorted sources.
///
/// Works like a textbook heap merge with three additions:
///
/// - `add` can register new sources at any time, between any two records.
/// - `least_exhausted` turns true when a readiness check finds that the
///   source used last has run dry. During paging that source may still have
///   a page in flight whose keys sort before what the other sources would
///   emit next, so the caller should hold back until it has fetched more or
///   knows no more pages will come.
/// - Every emitted record's source index is appended to a sort trace, and
///   every source handle is kept, so the order can be replayed later.
///
/// Records are emitted in non-decreasing comparator order over the sources
/// registered at that point. Records emitted before an `add` are not
/// revisited.
pub struct RecordingMergeIterator<S: Source, F> {
    heap: CursorHeap<Entry<S::Item, S::Cursor>>,
    pending: Option<Pending<S::Cursor>>,
    least_exhausted: bool,
    trace: SortTrace,
    /// Handles of every registered source, by index. Emptied for good once
    /// the trace is released.
    sources: Vec<S>,
    next_index: SourceIndex,
    emitted: usize,
    compare: F,
    tie_break: TieBreak,
}

impl<S, F> RecordingMergeIterator<S, F>
where
    S: Source,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    /// Create an empty merge ordered by `compare`.
    pub fn new(compare: F) -> Self {
        Self::with_options(compare, Options::default())
    }

    /// Create an empty merge ordered by `compare`, with tie-break and trace
    /// limit taken from `options`.
    pub fn with_options(compare: F, options: Options) -> Self {
        RecordingMergeIterator {
            heap: CursorHeap::new(),
            pending: None,
            least_exhausted: false,
            trace: SortTrace::new(options.trace_limit),
            sources: Vec::new(),
            next_index: 0,
            emitted: 0,
            compare,
            tie_break: options.tie_break,
        }
    }

    /// Register more sources.
    ///
    /// The pending source is settled first so it competes with the new ones
    /// on its real next record. If it turns out dry it stays parked, and the
    /// next readiness check still raises the exhaustion signal for it.
    /// Sources without records are dropped and get no index. Clears the
    /// exhaustion signal that was already raised: the new data may be the
    /// continuation of whatever ran dry.
    ///
    /// # Panics
    ///
    /// Panics if more than `SourceIndex::MAX` sources are registered.
    pub fn add<I>(&mut self, sources: I)
    where
        I: IntoIterator<Item = S>,
    {
        if let Some(pending) = self.pending.take() {
            self.pending = self.reinsert(pending);
        }

        let mut added = 0usize;
        let mut skipped = 0usize;
        for source in sources {
            let mut cursor = source.cursor();
            let Some(head) = cursor.next() else {
                skipped += 1;
                continue;
            };
            let index = self.next_index;
            let Some(next) = index.checked_add(1) else {
                panic!("source index space exhausted after {index} sources");
            };
            self.next_index = next;
            if !self.trace.is_released() {
                self.sources.push(source);
            }
            self.push(Entry {
                index,
                head,
                cursor,
            });
            added += 1;
        }

        self.least_exhausted = false;
        debug!(
            added,
            skipped_empty = skipped,
            active = self.heap.len(),
            registered = self.next_index,
            "Merged sources"
        );
    }

    /// Settle the pending source and report whether a record is available.
    pub fn ready(&mut self) -> bool {
        if let Some(pending) = self.pending.take() {
            if let Some(dry) = self.reinsert(pending) {
                self.least_exhausted = true;
                trace!(source = dry.index, "Source exhausted; raising exhaustion signal");
            }
        }
        !self.heap.is_empty()
    }

    /// Emit the smallest record.
    ///
    /// Fails with [`Error::Exhausted`] when no source has a record left; the
    /// merge is left untouched and works normally after the next `add`.
    pub fn consume(&mut self) -> Result<S::Item> {
        if !self.ready() {
            return Err(Error::Exhausted);
        }
        let (compare, tie_break) = (&mut self.compare, self.tie_break);
        let entry = self
            .heap
            .pop(|a, b| precedes(&mut *compare, tie_break, a, b))
            .ok_or(Error::Exhausted)?;

        self.emitted += 1;
        if !self.trace.record(entry.index) {
            warn!(
                limit = ?self.trace.limit(),
                sources = self.sources.len(),
                "Sort trace limit exceeded; releasing replay state"
            );
            self.sources = Vec::new();
        }

        self.pending = Some(Pending {
            index: entry.index,
            cursor: entry.cursor,
            dry: false,
        });
        Ok(entry.head)
    }

    /// Replay every record emitted so far, in emission order.
    ///
    /// Uses fresh cursors from the stored source handles; the live merge is
    /// not affected. Fails if a trace limit released the replay state.
    pub fn replay(&self) -> Result<Replay<S>> {
        if self.trace.is_released() {
            return Err(Error::ReplayUnavailable {
                limit: self.trace.limit().unwrap_or_default(),
            });
        }
        Ok(Replay::new(self.trace.as_slice().to_vec(), &self.sources))
    }

    /// True once a readiness check found the last used source dry, until the
    /// next `add`.
    pub fn least_exhausted(&self) -> bool {
        self.least_exhausted
    }

    /// Source indices of the emitted records. Empty after release.
    pub fn trace(&self) -> &[SourceIndex] {
        self.trace.as_slice()
    }

    /// Total records emitted.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Number of sources that received an index.
    pub fn source_count(&self) -> usize {
        self.next_index as usize
    }

    /// Sources currently competing in the heap, plus the pending one.
    pub fn active_sources(&self) -> usize {
        self.heap.len() + usize::from(self.pending.is_some())
    }

    /// Pull the pending source's next record and put it back in the heap.
    /// Hands the entry back, marked dry, if the source had nothing left.
    fn reinsert(&mut self, pending: Pending<S::Cursor>) -> Option<Pending<S::Cursor>> {
        if pending.dry {
            return Some(pending);
        }
        let Pending { index, mut cursor, .. } = pending;
        match cursor.next() {
            Some(head) => {
                self.push(Entry {
                    index,
                    head,
                    cursor,
                });
                None
            }
            None => Some(Pending {
                index,
                cursor,
                dry: true,
            }),
        }
    }

    fn push(&mut self, entry: Entry<S::Item, S::Cursor>) {
        let (compare, tie_break) = (&mut self.compare, self.tie_break);
        self.heap
            .push(entry, |a, b| precedes(&mut *compare, tie_break, a, b));
    }
}

/// Heap predicate: does `a` come out before `b`?
fn precedes<T, C, F>(compare: &mut F, tie_break: TieBreak, a: &Entry<T, C>, b: &Entry<T, C>) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    match compare(&a.head, &b.head) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => match tie_break {
            TieBreak::SourceIndex => a.index < b.index,
            TieBreak::Unspecified => false,
        },
    }
}

use std::cmp::Ordering;

use tracing::debug;

use crate::error::{Error, Result};
use crate::iterator::PagingIterator;
use crate::iterator::merge::RecordingMergeIterator;
use crate::iterator::replay::Replay;
use crate::options::Options;
use crate::source::Source;

/// Paging iterator that merges sorted pages into one sorted stream.
///
/// Records are only handed out while every tracked source still has data.
/// Once one runs dry, a later page for that shard could hold keys smaller than
/// anything the others would emit next, so `ready` turns false until either
/// more sources are merged or `finish` says no further pages will come.
///
/// ```
/// use paging_merge::{Page, PagingIterator, SortedPagingIterator};
///
/// let mut it: SortedPagingIterator<Page<i32>, _> = SortedPagingIterator::by_ord();
/// it.merge([Page::new(vec![1, 3, 5]), Page::new(vec![2, 4, 6])]);
/// it.finish();
///
/// let first: Vec<i32> = it.by_ref().collect();
/// assert_eq!(first, vec![1, 2, 3, 4, 5, 6]);
/// assert_eq!(it.repeat().unwrap().collect::<Vec<_>>(), first);
/// ```
///
/// As an `Iterator`, `None` means "nothing deliverable right now", not
/// "finished for good": merging more sources can make `next` return records
/// again.
pub struct SortedPagingIterator<S: Source, F> {
    merge: RecordingMergeIterator<S, F>,
    finished: bool,
}

impl<S, F> SortedPagingIterator<S, F>
where
    S: Source,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    /// Create an empty paging iterator ordered by `compare`, gating on.
    pub fn new(compare: F) -> Self {
        Self::with_options(compare, Options::default())
    }

    /// Like [`new`](Self::new), with tie-break and trace limit from `options`.
    pub fn with_options(compare: F, options: Options) -> Self {
        SortedPagingIterator {
            merge: RecordingMergeIterator::with_options(compare, options),
            finished: false,
        }
    }

    /// Whether `finish` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The underlying merge, for inspection.
    pub fn merger(&self) -> &RecordingMergeIterator<S, F> {
        &self.merge
    }
}

impl<S> SortedPagingIterator<S, fn(&S::Item, &S::Item) -> Ordering>
where
    S: Source,
    S::Item: Ord,
{
    /// Ascending natural order.
    pub fn by_ord() -> Self {
        Self::new(<S::Item as Ord>::cmp)
    }
}

impl<S, F> PagingIterator for SortedPagingIterator<S, F>
where
    S: Source,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    type Source = S;
    type Replay = Replay<S>;

    fn merge<I>(&mut self, sources: I)
    where
        I: IntoIterator<Item = S>,
    {
        self.merge.add(sources);
    }

    fn finish(&mut self) {
        debug!(
            emitted = self.merge.emitted(),
            least_exhausted = self.merge.least_exhausted(),
            "Paging finished; exhaustion gating disabled"
        );
        self.finished = true;
    }

    fn ready(&mut self) -> bool {
        self.merge.ready() && (self.finished || !self.merge.least_exhausted())
    }

    fn consume(&mut self) -> Result<S::Item> {
        if !self.ready() {
            return Err(Error::Exhausted);
        }
        self.merge.consume()
    }

    fn repeat(&self) -> Result<Replay<S>> {
        self.merge.replay()
    }
}

impl<S, F> Iterator for SortedPagingIterator<S, F>
where
    S: Source,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        self.consume().ok()
    }
}

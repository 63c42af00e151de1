use std::collections::VecDeque;
use std::iter::{Flatten, Peekable, Take};
use std::vec;

use tracing::debug;

use crate::error::{Error, Result};
use crate::iterator::PagingIterator;
use crate::source::Source;

/// Replay of a [`PassThroughPagingIterator`]: fresh cursors chained in
/// registration order, cut off after the records emitted so far.
pub type PassThroughReplay<C> = Take<Flatten<vec::IntoIter<C>>>;

/// Paging iterator for results that need no ordering.
///
/// Sources are drained one after the other in the order they were merged.
/// Since no order is at stake there is no exhaustion gating; `finish` is
/// recorded but does not change what `ready` returns.
///
/// Emitted records are always a prefix of the concatenated sources, so
/// replay needs no trace, only the emitted count.
pub struct PassThroughPagingIterator<S: Source> {
    queue: VecDeque<Peekable<S::Cursor>>,
    sources: Vec<S>,
    emitted: usize,
    finished: bool,
}

impl<S: Source> PassThroughPagingIterator<S> {
    /// Create an empty pass-through iterator.
    pub fn new() -> Self {
        PassThroughPagingIterator {
            queue: VecDeque::new(),
            sources: Vec::new(),
            emitted: 0,
            finished: false,
        }
    }

    /// Whether `finish` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Total records emitted.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl<S: Source> Default for PassThroughPagingIterator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Source> PagingIterator for PassThroughPagingIterator<S> {
    type Source = S;
    type Replay = PassThroughReplay<S::Cursor>;

    fn merge<I>(&mut self, sources: I)
    where
        I: IntoIterator<Item = S>,
    {
        let before = self.sources.len();
        for source in sources {
            self.queue.push_back(source.cursor().peekable());
            self.sources.push(source);
        }
        debug!(
            added = self.sources.len() - before,
            queued = self.queue.len(),
            "Queued pass-through sources"
        );
    }

    fn finish(&mut self) {
        self.finished = true;
    }

    fn ready(&mut self) -> bool {
        while let Some(front) = self.queue.front_mut() {
            if front.peek().is_some() {
                return true;
            }
            self.queue.pop_front();
        }
        false
    }

    fn consume(&mut self) -> Result<S::Item> {
        if !self.ready() {
            return Err(Error::Exhausted);
        }
        let record = self
            .queue
            .front_mut()
            .and_then(Iterator::next)
            .ok_or(Error::Exhausted)?;
        self.emitted += 1;
        Ok(record)
    }

    fn repeat(&self) -> Result<Self::Replay> {
        let cursors: Vec<S::Cursor> = self.sources.iter().map(|s| s.cursor()).collect();
        Ok(cursors.into_iter().flatten().take(self.emitted))
    }
}

impl<S: Source> Iterator for PassThroughPagingIterator<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        self.consume().ok()
    }
}

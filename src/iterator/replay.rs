use std::iter::FusedIterator;

use tracing::debug;

use crate::source::Source;
use crate::types::SourceIndex;

/// Reproduces a recorded merge order without comparing anything.
///
/// Holds its own copy of the sort trace and one fresh cursor per registered
/// source. Step `i` pulls the next record from the cursor named by
/// `trace[i]`. Nothing here touches the live merge, so a replay can be
/// drained before, after or in between further live consumption.
///
/// If a cursor runs dry before the trace says it should, the source no
/// longer yields what the live merge saw. Replay stops there instead of
/// emitting a wrong order.
pub struct Replay<S: Source> {
    trace: Vec<SourceIndex>,
    pos: usize,
    cursors: Vec<S::Cursor>,
}

impl<S: Source> Replay<S> {
    pub(crate) fn new(trace: Vec<SourceIndex>, sources: &[S]) -> Self {
        let cursors = sources.iter().map(|source| source.cursor()).collect();
        debug!(
            records = trace.len(),
            sources = sources.len(),
            "Created merge replay"
        );
        Replay {
            trace,
            pos: 0,
            cursors,
        }
    }

    /// Number of records replayed so far.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<S: Source> Iterator for Replay<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        let &index = self.trace.get(self.pos)?;
        assert!(
            (index as usize) < self.cursors.len(),
            "sort trace references unknown source {index}"
        );
        self.pos += 1;

        match self.cursors[index as usize].next() {
            Some(record) => Some(record),
            None => {
                debug!(
                    source = index,
                    position = self.pos - 1,
                    expected = self.trace.len(),
                    "Source ran dry during replay; stopping early"
                );
                self.pos = self.trace.len();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.trace.len() - self.pos))
    }
}

impl<S: Source> FusedIterator for Replay<S> {}

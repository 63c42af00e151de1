use crate::types::SourceIndex;

/// Append-only record of which source produced each emitted record.
///
/// Entry `i` is the index of the source that produced the `i`-th record.
/// With a limit set, recording stops for good once the limit is passed and the
/// buffer is released; an incomplete trace is useless for replay.
#[derive(Debug, Clone, Default)]
pub struct SortTrace {
    indices: Vec<SourceIndex>,
    limit: Option<usize>,
    released: bool,
}

impl SortTrace {
    /// Empty trace. `None` means no limit.
    pub fn new(limit: Option<usize>) -> Self {
        SortTrace {
            indices: Vec::new(),
            limit,
            released: false,
        }
    }

    /// Append one source index.
    ///
    /// Returns false when this call pushed the trace past its limit, i.e. the
    /// trace was just released. Later calls after release are no-ops that
    /// return true.
    pub fn record(&mut self, index: SourceIndex) -> bool {
        if self.released {
            return true;
        }
        if self.limit.is_some_and(|limit| self.indices.len() >= limit) {
            self.indices = Vec::new();
            self.released = true;
            return false;
        }
        self.indices.push(index);
        true
    }

    /// Recorded indices, oldest first. Empty after release.
    pub fn as_slice(&self) -> &[SourceIndex] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether the limit was exceeded and the trace dropped.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// The configured limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

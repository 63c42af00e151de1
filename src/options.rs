/// How records with equal keys from different sources are ordered.
///
/// The comparator alone cannot tell two equal records apart, so the heap
/// needs a rule for which source goes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Equal keys come out in ascending source index order.
    #[default]
    SourceIndex,
    /// Whatever the heap happens to produce. Saves one integer compare per
    /// sift step; output order among equal keys is unspecified.
    Unspecified,
}

/// Configuration for a sorted paging merge.
///
/// ```
/// use paging_merge::{Options, TieBreak};
///
/// let opts = Options::default()
///     .with_tie_break(TieBreak::Unspecified)
///     .with_trace_limit(1_000_000);
/// assert_eq!(opts.trace_limit, Some(1_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    /// Ordering among equal keys.
    pub tie_break: TieBreak,
    /// Maximum number of emitted records the sort trace may cover.
    ///
    /// `None` keeps the trace and every source handle for the lifetime of the
    /// merge. With `Some(n)`, emitting record `n + 1` releases both and
    /// `repeat()` fails with `Error::ReplayUnavailable` from then on.
    pub trace_limit: Option<usize>,
}

impl Options {
    /// Set the tie-break rule.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Bound the sort trace (and with it, replay support) to `limit` records.
    pub fn with_trace_limit(mut self, limit: usize) -> Self {
        self.trace_limit = Some(limit);
        self
    }
}

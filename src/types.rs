/// Stable number assigned to a source when it is registered.
///
/// Allocated densely from 0 in registration order across all `merge` calls
/// and never reused. Only sources that had at least one record when they were
/// merged receive an index. The sort trace stores one of these per emitted
/// record, so it is kept at 32 bits.
pub type SourceIndex = u32;

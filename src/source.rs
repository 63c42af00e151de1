use std::sync::Arc;

/// A sorted, restartable sequence of records.
///
/// Every call to [`cursor`](Source::cursor) must start a fresh, independent
/// iteration from the first record. The merge consumes one cursor live; replay
/// asks for another one later and expects it to yield the same records in the
/// same order.
///
/// Records are handed out as owned values, so a record can be kept for as long
/// as the caller likes without being overwritten by the next pull.
pub trait Source {
    /// Record type.
    type Item;
    /// Owned cursor over the records.
    type Cursor: Iterator<Item = Self::Item>;

    /// Start a new iteration from the beginning.
    fn cursor(&self) -> Self::Cursor;
}

/// One page of rows fetched from a shard.
///
/// Backed by an `Arc<[T]>`, so cloning a page (and the handle kept for replay)
/// does not copy rows. Cursors clone each row out as it is pulled.
#[derive(Debug)]
pub struct Page<T> {
    rows: Arc<[T]>,
}

impl<T> Page<T> {
    /// Wrap already sorted rows as a page.
    pub fn new(rows: Vec<T>) -> Self {
        Page { rows: rows.into() }
    }

    /// Number of rows in the page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True for a page without rows. Such a page never gets a source index.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows, in page order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }
}

impl<T> Clone for Page<T> {
    fn clone(&self) -> Self {
        Page {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T> From<Vec<T>> for Page<T> {
    fn from(rows: Vec<T>) -> Self {
        Page::new(rows)
    }
}

impl<T> FromIterator<T> for Page<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Page {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<T: Clone> Source for Page<T> {
    type Item = T;
    type Cursor = PageCursor<T>;

    fn cursor(&self) -> PageCursor<T> {
        PageCursor {
            rows: Arc::clone(&self.rows),
            pos: 0,
        }
    }
}

/// Cursor over a [`Page`]. Holds its own reference to the rows.
#[derive(Debug, Clone)]
pub struct PageCursor<T> {
    rows: Arc<[T]>,
    pos: usize,
}

impl<T: Clone> Iterator for PageCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let row = self.rows.get(self.pos)?.clone();
        self.pos += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for PageCursor<T> {}

/// A source backed by a factory closure, called once per cursor.
///
/// Useful when rows live behind some other handle (a searcher, a decoded
/// buffer) that can be re-read from the start on demand.
#[derive(Debug, Clone)]
pub struct FnSource<F> {
    factory: F,
}

/// Wrap a factory closure as a [`Source`].
///
/// ```
/// use paging_merge::source::{self, Source};
///
/// let evens = source::from_fn(|| (0..3).map(|i| i * 2));
/// assert_eq!(evens.cursor().collect::<Vec<_>>(), vec![0, 2, 4]);
/// assert_eq!(evens.cursor().collect::<Vec<_>>(), vec![0, 2, 4]);
/// ```
pub fn from_fn<F, I>(factory: F) -> FnSource<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    FnSource { factory }
}

impl<F, I> Source for FnSource<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Cursor = I::IntoIter;

    fn cursor(&self) -> I::IntoIter {
        (self.factory)().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_cursors_are_independent() {
        let page = Page::new(vec![1, 2, 3]);
        let mut first = page.cursor();
        assert_eq!(first.next(), Some(1));
        assert_eq!(first.next(), Some(2));

        let second: Vec<_> = page.cursor().collect();
        assert_eq!(second, vec![1, 2, 3]);
        assert_eq!(first.next(), Some(3));
        assert_eq!(first.next(), None);
    }

    #[test]
    fn page_clone_shares_rows() {
        let page: Page<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        let copy = page.clone();
        assert!(std::ptr::eq(page.rows().as_ptr(), copy.rows().as_ptr()));
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn page_cursor_size_hint() {
        let page = Page::new(vec![10, 20, 30]);
        let mut cursor = page.cursor();
        cursor.next();
        assert_eq!(cursor.len(), 2);
    }

    #[test]
    fn fn_source_restarts() {
        let src = from_fn(|| vec!["x", "y"]);
        assert_eq!(src.cursor().count(), 2);
        assert_eq!(src.cursor().next(), Some("x"));
    }
}

/// Binary min-heap ordered by a caller-supplied predicate.
///
/// `std::collections::BinaryHeap` needs `Ord` on its elements, but the merge
/// order comes from a comparator chosen at runtime. So the predicate is passed
/// into every operation instead of living in the element type.
///
/// `less(a, b)` must return true when `a` has to come out before `b`.
/// Layout: the usual implicit tree in a Vec, children of `i` at `2i+1, 2i+2`.
pub(crate) struct CursorHeap<E> {
    entries: Vec<E>,
}

impl<E> CursorHeap<E> {
    pub(crate) fn new() -> Self {
        CursorHeap {
            entries: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry. O(log n).
    pub(crate) fn push<L>(&mut self, entry: E, mut less: L)
    where
        L: FnMut(&E, &E) -> bool,
    {
        self.entries.push(entry);
        let mut child = self.entries.len() - 1;
        while child > 0 {
            let parent = (child - 1) / 2;
            if !less(&self.entries[child], &self.entries[parent]) {
                break;
            }
            self.entries.swap(child, parent);
            child = parent;
        }
    }

    /// Remove and return the minimum entry. O(log n).
    pub(crate) fn pop<L>(&mut self, mut less: L) -> Option<E>
    where
        L: FnMut(&E, &E) -> bool,
    {
        if self.entries.is_empty() {
            return None;
        }
        let min = self.entries.swap_remove(0);

        // Sift the moved tail element down from the root
        let len = self.entries.len();
        let mut parent = 0;
        loop {
            let left = 2 * parent + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && less(&self.entries[right], &self.entries[left]) {
                right
            } else {
                left
            };
            if !less(&self.entries[smaller], &self.entries[parent]) {
                break;
            }
            self.entries.swap(parent, smaller);
            parent = smaller;
        }

        Some(min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lt(a: &i32, b: &i32) -> bool {
        a < b
    }

    #[test]
    fn pops_in_ascending_order() {
        let mut heap = CursorHeap::new();
        for v in [5, 1, 4, 1, 9, 2, 6, 5, 3] {
            heap.push(v, lt);
        }
        assert_eq!(heap.len(), 9);

        let mut out = Vec::new();
        while let Some(v) = heap.pop(lt) {
            out.push(v);
        }
        assert_eq!(out, vec![1, 1, 2, 3, 4, 5, 5, 6, 9]);
        assert!(heap.is_empty());
    }

    #[test]
    fn predicate_controls_direction() {
        let mut heap = CursorHeap::new();
        let gt = |a: &i32, b: &i32| a > b;
        for v in [3, 7, 1] {
            heap.push(v, gt);
        }
        assert_eq!(heap.pop(gt), Some(7));
        assert_eq!(heap.pop(gt), Some(3));
        assert_eq!(heap.pop(gt), Some(1));
        assert_eq!(heap.pop(gt), None);
    }

    #[test]
    fn interleaved_push_pop() {
        let mut heap = CursorHeap::new();
        heap.push(10, lt);
        heap.push(4, lt);
        assert_eq!(heap.pop(lt), Some(4));
        heap.push(2, lt);
        heap.push(12, lt);
        assert_eq!(heap.pop(lt), Some(2));
        assert_eq!(heap.pop(lt), Some(10));
        assert_eq!(heap.pop(lt), Some(12));
        assert_eq!(heap.pop(lt), None);
    }
}

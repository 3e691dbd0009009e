//! Per-parent slot occupancy for index bookkeeping.
//!
//! Every parent gets a fixed slot order laid out before any edit is emitted:
//! one slot per old child and one per incoming child, in the order the rows
//! will occupy on screen. A row's index at any moment is the number of
//! occupied slots before its own, answered by a Fenwick tree in O(log n).

#[derive(Debug, Clone)]
pub(crate) struct SlotCounter {
    tree: Vec<i64>,
}

impl SlotCounter {
    /// Counter over `len` slots, all empty
    pub(crate) fn new(len: usize) -> Self {
        Self {
            tree: vec![0; len + 1],
        }
    }

    fn add(&mut self, slot: usize, delta: i64) {
        let mut i = slot + 1;
        while i < self.tree.len() {
            self.tree[i] += delta;
            i += i & i.wrapping_neg();
        }
    }

    pub(crate) fn occupy(&mut self, slot: usize) {
        self.add(slot, 1);
    }

    pub(crate) fn vacate(&mut self, slot: usize) {
        self.add(slot, -1);
    }

    /// Number of occupied slots strictly before `slot`
    pub(crate) fn occupied_before(&self, slot: usize) -> usize {
        let mut i = slot;
        let mut sum = 0i64;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        usize::try_from(sum).unwrap_or(0)
    }
}

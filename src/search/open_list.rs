use crate::Cost;
use hashbrown::HashMap;
use std::cmp::Ordering;
use std::hash::Hash;

/// The priority of an entry in an [`OpenList`]. Compared lexicographically, smaller first.
///
/// A* uses `Key(f, g)`, D*-Lite uses its two-component key directly.
#[derive(Clone, Copy, Debug)]
pub struct Key(pub Cost, pub Cost);

impl PartialEq for Key {
    fn eq(&self, other: &Key) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Key) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Key {
    fn cmp(&self, other: &Key) -> Ordering {
        self.0
            .total_cmp(&other.0)
            .then_with(|| self.1.total_cmp(&other.1))
    }
}

/// Cost differences up to this size are rounding noise from summing `√2` steps.
pub const KEY_TOLERANCE: Cost = 1e-9;

fn nearly_equal(a: Cost, b: Cost) -> bool {
    a == b || (a - b).abs() <= KEY_TOLERANCE
}

impl Key {
    /// `true` if `self` comes before `other` by more than [`KEY_TOLERANCE`].
    ///
    /// Components within the tolerance of each other count as equal, so two Keys that only
    /// differ by rounding are never ordered.
    ///
    /// ```
    /// # use incremental_pathfinding::search::Key;
    /// let sum = 0.1 + 0.2;
    /// assert!(Key(sum, 1.0) > Key(0.3, 1.0));
    /// assert!(!Key(0.3, 1.0).precedes(Key(sum, 1.0)));
    /// assert!(Key(0.3, 0.0).precedes(Key(sum, 1.0)));
    /// assert!(Key(1.0, 5.0).precedes(Key(f64::INFINITY, 0.0)));
    /// ```
    pub fn precedes(self, other: Key) -> bool {
        if nearly_equal(self.0, other.0) {
            !nearly_equal(self.1, other.1) && self.1 < other.1
        } else {
            self.0 < other.0
        }
    }
}

/// A binary min-heap that knows where each of its entries is.
///
/// Every element is contained at most once. Changing the priority of a queued element or
/// removing it from the middle of the heap takes `O(log n)`. Entries with equal [`Key`]s are
/// ordered by the element itself, so the order in which elements come out never depends on
/// insertion order.
///
/// ```
/// # use incremental_pathfinding::search::{Key, OpenList};
/// let mut open = OpenList::new();
/// open.push_or_update((0, 0), Key(5.0, 1.0));
/// open.push_or_update((1, 0), Key(3.0, 1.0));
/// open.push_or_update((0, 0), Key(2.0, 1.0)); // decrease-key
///
/// assert_eq!(open.len(), 2);
/// assert_eq!(open.pop(), Some(((0, 0), Key(2.0, 1.0))));
/// assert_eq!(open.remove((1, 0)), Some(Key(3.0, 1.0)));
/// assert!(open.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct OpenList<K> {
    heap: Vec<(Key, K)>,
    slots: HashMap<K, usize>,
}

impl<K: Copy + Ord + Hash> Default for OpenList<K> {
    fn default() -> Self {
        OpenList::new()
    }
}

impl<K: Copy + Ord + Hash> OpenList<K> {
    /// Creates an empty OpenList
    pub fn new() -> OpenList<K> {
        OpenList::with_capacity(0)
    }

    /// Creates an empty OpenList with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> OpenList<K> {
        OpenList {
            heap: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    /// the number of queued elements
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// `true` if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// `true` if `element` is queued
    pub fn contains(&self, element: K) -> bool {
        self.slots.contains_key(&element)
    }

    /// the Key of `element`, if it is queued
    pub fn get(&self, element: K) -> Option<Key> {
        self.slots.get(&element).map(|&i| self.heap[i].0)
    }

    /// the element with the smallest Key, without removing it
    pub fn peek(&self) -> Option<(K, Key)> {
        self.heap.first().map(|&(key, element)| (element, key))
    }

    /// Inserts `element`, or changes its Key if it is already queued.
    pub fn push_or_update(&mut self, element: K, key: Key) {
        if let Some(&i) = self.slots.get(&element) {
            self.heap[i].0 = key;
            let i = self.sift_up(i);
            self.sift_down(i);
        } else {
            let i = self.heap.len();
            self.heap.push((key, element));
            self.slots.insert(element, i);
            self.sift_up(i);
        }
    }

    /// Removes and returns the element with the smallest Key
    pub fn pop(&mut self) -> Option<(K, Key)> {
        let (key, element) = *self.heap.first()?;
        self.remove_at(0);
        Some((element, key))
    }

    /// Removes `element` from the queue. Returns its Key if it was queued.
    pub fn remove(&mut self, element: K) -> Option<Key> {
        let &i = self.slots.get(&element)?;
        let key = self.heap[i].0;
        self.remove_at(i);
        Some(key)
    }

    /// Removes all elements
    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
    }

    /// Iterates over the queued elements in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (K, Key)> + '_ {
        self.heap.iter().map(|&(key, element)| (element, key))
    }

    fn remove_at(&mut self, i: usize) {
        let last = self.heap.len() - 1;
        self.swap(i, last);
        if let Some((_, element)) = self.heap.pop() {
            self.slots.remove(&element);
        }
        if i < self.heap.len() {
            let i = self.sift_up(i);
            self.sift_down(i);
        }
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a] < self.heap[b]
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].1, a);
        self.slots.insert(self.heap[b].1, b);
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < self.heap.len() && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.heap.len() && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanorand::{Rng, WyRand};

    #[test]
    fn pops_in_order() {
        let mut rng = WyRand::new_seed(4);
        let mut open = OpenList::new();
        let mut expected = vec![];
        for i in 0..200usize {
            let key = Key(rng.generate_range(0..50u32) as Cost, 0.0);
            open.push_or_update(i, key);
            expected.push((key, i));
        }
        // update and remove some in the middle
        for i in (0..200usize).step_by(7) {
            let key = Key(rng.generate_range(0..50u32) as Cost, 1.0);
            open.push_or_update(i, key);
            expected[i] = (key, i);
        }
        for i in (0..200usize).step_by(11) {
            assert_eq!(open.remove(i), Some(expected[i].0));
        }
        expected.retain(|&(_, i)| i % 11 != 0);
        expected.sort();

        let mut popped = vec![];
        while let Some((element, key)) = open.pop() {
            popped.push((key, element));
        }
        assert_eq!(popped, expected);
    }

    #[test]
    fn ties_are_broken_by_element() {
        let mut open = OpenList::new();
        open.push_or_update((2, 0), Key(1.0, 1.0));
        open.push_or_update((0, 5), Key(1.0, 1.0));
        open.push_or_update((1, 1), Key(1.0, 0.5));
        assert_eq!(open.pop().map(|(e, _)| e), Some((1, 1)));
        assert_eq!(open.pop().map(|(e, _)| e), Some((0, 5)));
        assert_eq!(open.pop().map(|(e, _)| e), Some((2, 0)));
        assert_eq!(open.pop(), None);
    }

    #[test]
    fn precedes_ignores_rounding() {
        let summed: Cost = (0..10).map(|_| std::f64::consts::SQRT_2).sum();
        let scaled = 10.0 * std::f64::consts::SQRT_2;
        assert!(!Key(summed, 0.0).precedes(Key(scaled, 0.0)));
        assert!(!Key(scaled, 0.0).precedes(Key(summed, 0.0)));
        assert!(Key(scaled, 0.0).precedes(Key(summed, 2.0)));
        assert!(Key(scaled, 0.0).precedes(Key(summed + 0.5, 0.0)));

        let inf = Cost::INFINITY;
        assert!(!Key(inf, inf).precedes(Key(inf, inf)));
        assert!(Key(inf, 1.0).precedes(Key(inf, inf)));
        assert!(!Key(inf, 0.0).precedes(Key(1e300, 1e300)));
    }

    #[test]
    fn infinite_keys() {
        let mut open = OpenList::new();
        open.push_or_update(0usize, Key(Cost::INFINITY, Cost::INFINITY));
        open.push_or_update(1usize, Key(3.0, Cost::INFINITY));
        assert_eq!(open.peek(), Some((1, Key(3.0, Cost::INFINITY))));
        assert!(Key(Cost::INFINITY, 0.0) > Key(1e300, 1e300));
        assert_eq!(open.get(0), Some(Key(Cost::INFINITY, Cost::INFINITY)));
        assert!(!open.contains(2));
    }
}

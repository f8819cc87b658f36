use std::hash::{BuildHasherDefault, Hasher};

use crate::sets::visited::VisitorSet;

/// Node identities are already well-distributed integers, so hashing them
/// again is wasted work. This hasher just passes the key through.
#[derive(Default)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    fn write(&mut self, _bytes: &[u8]) {
        panic!("This hasher only accepts u64/usize keys");
    }

    fn write_usize(&mut self, i: usize) {
        self.hash = i as u64;
    }

    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }

    fn finish(&self) -> u64 {
        self.hash
    }
}

/// A visited set backed by a `hashbrown` integer set.
///
/// Memory scales with the number of nodes actually marked rather than with
/// the node count, which is what you want for a graph with millions of nodes
/// searched under a small expansion budget: a [`BitmaskSet`] would spend
/// O(node_count) on allocation and zeroing before the first expansion even
/// runs.
///
/// [`BitmaskSet`]: crate::sets::visited::BitmaskSet
///
/// # Examples
///
/// ```
/// use meander::sets::visited::{SparseSet, VisitorSet};
///
/// let mut vs = SparseSet::new();
/// vs.set(1_000_000_000);
/// assert!(vs.get(1_000_000_000));
/// assert!(!vs.get(0));
/// ```
#[derive(Default)]
pub struct SparseSet {
    entries: hashbrown::HashSet<usize, BuildHasherDefault<NoOpHasher>>,
}

impl SparseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently-marked nodes, i.e. the length of the path being
    /// extended when owned by an in-progress search.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl VisitorSet for SparseSet {
    fn get(&self, i: usize) -> bool {
        self.entries.contains(&i)
    }

    fn set(&mut self, i: usize) {
        self.entries.insert(i);
    }

    fn unset(&mut self, i: usize) {
        self.entries.remove(&i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_hasher_is_identity_on_usize() {
        let mut hasher = NoOpHasher::default();
        hasher.write_usize(42);
        assert_eq!(hasher.finish(), 42);

        let mut hasher2 = NoOpHasher::default();
        hasher2.write_u64(u64::MAX);
        assert_eq!(hasher2.finish(), u64::MAX);
    }

    #[test]
    #[should_panic]
    fn noop_hasher_rejects_byte_slices() {
        let mut hasher = NoOpHasher::default();
        hasher.write(b"nope");
    }

    #[test]
    fn starts_empty() {
        let vs = SparseSet::new();
        assert!(vs.is_empty());
        assert_eq!(vs.len(), 0);
        assert!(!vs.get(0));
        assert!(!vs.get(usize::MAX));
    }

    #[test]
    fn set_get_unset_round_trip() {
        let mut vs = SparseSet::new();

        vs.set(7);
        vs.set(123_456_789);
        assert!(vs.get(7));
        assert!(vs.get(123_456_789));
        assert_eq!(vs.len(), 2);

        vs.unset(7);
        assert!(!vs.get(7));
        assert!(vs.get(123_456_789));
        assert_eq!(vs.len(), 1);
    }

    #[test]
    fn behaves_like_bitmask_under_backtracking_pattern() {
        use crate::sets::visited::BitmaskSet;

        let cap = 64;
        let mut dense = BitmaskSet::new(cap);
        let mut sparse = SparseSet::new();

        // Interleaved marks and unmarks, then compare every readable bit.
        let script: &[(bool, usize)] = &[
            (true, 3),
            (true, 17),
            (true, 63),
            (false, 17),
            (true, 17),
            (false, 3),
            (true, 0),
            (false, 63),
        ];
        for &(mark, i) in script {
            if mark {
                dense.set(i);
                sparse.set(i);
            } else {
                dense.unset(i);
                sparse.unset(i);
            }
        }

        for i in 0..cap {
            assert_eq!(dense.get(i), sparse.get(i), "mismatch at {}", i);
        }
    }
}

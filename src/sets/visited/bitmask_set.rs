use crate::sets::visited::VisitorSet;

/// A fixed-capacity set of boolean values packed into a contiguous
/// buffer of bytes.
///
/// Each bit can be individually set, cleared and queried. This is the
/// default visited-set representation: node identities are dense in
/// `[0, node_count)`, so one bit per node is as compact as it gets and
/// every operation is a single shift and mask.
///
/// # Examples
///
/// ```
/// use meander::sets::visited::{BitmaskSet, VisitorSet};
///
/// let mut bs = BitmaskSet::new(10);
/// assert!(!bs.get(3));
///
/// bs.set(3);
/// assert!(bs.get(3));
///
/// bs.unset(3);
/// assert!(!bs.get(3));
/// ```
pub struct BitmaskSet {
    /*private*/ buffer: Box<[u8]>,
    /*private*/ capacity: usize,
}

impl BitmaskSet {
    /// Constructs a new [`BitmaskSet`] with space for `capacity` bits,
    /// all initialized to zero.
    ///
    /// # Examples
    /// ```
    /// use meander::sets::visited::{BitmaskSet, VisitorSet};
    ///
    /// let bs = BitmaskSet::new(12);
    /// assert!(!bs.get(0));
    /// ```
    pub fn new(capacity: usize) -> Self {
        let bytes_needed: usize = capacity.div_ceil(8);
        BitmaskSet {
            buffer: vec![0u8; bytes_needed].into_boxed_slice(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl VisitorSet for BitmaskSet {
    /// Sets the bit at the given `index` to `1`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    fn set(&mut self, index: usize) {
        assert!(index < self.capacity);

        let byte_index = index / 8;
        let bit_index = index % 8;

        self.buffer[byte_index] |= 1u8 << bit_index
    }

    /// Clears the bit at the given `index` back to `0`. This is what a
    /// backtracking exit does to give sibling branches their shot at the
    /// node.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    fn unset(&mut self, index: usize) {
        assert!(index < self.capacity);

        let byte_index = index / 8;
        let bit_index = index % 8;

        self.buffer[byte_index] &= !(1u8 << bit_index)
    }

    /// Returns `true` if the bit at `index` is set.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    fn get(&self, index: usize) -> bool {
        assert!(index < self.capacity);

        let byte_index = index / 8;
        let bit_index = index % 8;

        self.buffer[byte_index] & (1u8 << bit_index) != 0
    }
}

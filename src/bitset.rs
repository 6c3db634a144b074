//! Fixed-capacity bit set used by the cover searches.
//!
//! Minterms are mapped to dense indices once per search so coverage checks
//! become word-wise `OR`/`AND` operations instead of set lookups.

/// A bit set backed by a vector of u64 words.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct BitSet {
    words: Vec<u64>,
}

impl BitSet {
    const BITS_PER_WORD: usize = 64;

    /// Creates an empty bit set able to hold `capacity` bits.
    pub(crate) fn new(capacity: usize) -> Self {
        let num_words = capacity.div_ceil(Self::BITS_PER_WORD);
        Self {
            words: vec![0; num_words],
        }
    }

    /// Creates a bit set with bits `0..capacity` set.
    pub(crate) fn full(capacity: usize) -> Self {
        let mut set = Self::new(capacity);
        for i in 0..capacity {
            set.insert(i);
        }
        set
    }

    #[inline]
    pub(crate) fn insert(&mut self, index: usize) {
        self.words[index / Self::BITS_PER_WORD] |= 1u64 << (index % Self::BITS_PER_WORD);
    }

    #[inline]
    pub(crate) fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / Self::BITS_PER_WORD)
            .is_some_and(|w| w & (1u64 << (index % Self::BITS_PER_WORD)) != 0)
    }

    /// Number of set bits.
    pub(crate) fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub(crate) fn clear(&mut self) {
        self.words.fill(0);
    }

    /// In-place union. Both sets must have the same capacity.
    #[inline]
    pub(crate) fn union_with(&mut self, other: &BitSet) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
    }

    /// Returns true if every bit of `other` is also set in `self`.
    #[inline]
    pub(crate) fn is_superset(&self, other: &BitSet) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .all(|(a, b)| b & !a == 0)
    }

    /// Number of bits set in `self` but not in `other`.
    pub(crate) fn count_difference(&self, other: &BitSet) -> usize {
        self.words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & !b).count_ones() as usize)
            .sum()
    }
}

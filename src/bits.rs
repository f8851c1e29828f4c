//! Bitset utility layer for vertex membership.
//!
//! Ring systems store their members as bitsets over global vertex indices.
//! Graphs with at most [`WORD_BITS`] vertices use a single `u64`; larger
//! graphs use the multi-word [`BitSet`]. Both implement [`VertexSet`], so
//! the search code is written once and monomorphised for each backend.

/// Number of vertices a single-word set can hold.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Set operations over dense vertex indices.
pub trait VertexSet: Clone + Default + PartialEq + std::fmt::Debug {
    /// An empty set able to hold vertices `0..order`.
    fn with_order(order: usize) -> Self;
    fn insert(&mut self, v: usize);
    fn remove(&mut self, v: usize);
    fn contains(&self, v: usize) -> bool;
    /// In-place union.
    fn union_with(&mut self, other: &Self);
    fn intersects(&self, other: &Self) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Member indices in ascending order.
    fn to_vec(&self) -> Vec<usize>;
}

impl VertexSet for u64 {
    fn with_order(order: usize) -> Self {
        debug_assert!(order <= WORD_BITS, "{} vertices do not fit one word", order);
        0
    }

    fn insert(&mut self, v: usize) {
        *self |= 1u64 << v;
    }

    fn remove(&mut self, v: usize) {
        *self &= !(1u64 << v);
    }

    fn contains(&self, v: usize) -> bool {
        v < WORD_BITS && *self & (1u64 << v) != 0
    }

    fn union_with(&mut self, other: &Self) {
        *self |= *other;
    }

    fn intersects(&self, other: &Self) -> bool {
        *self & *other != 0
    }

    fn len(&self) -> usize {
        self.count_ones() as usize
    }

    fn to_vec(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.len());
        let mut word = *self;
        while word != 0 {
            let bit = word.trailing_zeros() as usize;
            out.push(bit);
            word &= word - 1;
        }
        out
    }
}

/// A growable bitset backed by `Vec<u64>`.
#[derive(Debug, Clone, Default)]
pub struct BitSet {
    words: Vec<u64>,
}

impl BitSet {
    /// Create a set that holds `0..capacity` without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
        }
    }

    /// Iterate over set bits in ascending order.
    pub fn ones(&self) -> Ones<'_> {
        Ones {
            words: &self.words,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    fn trimmed(&self) -> &[u64] {
        let end = self
            .words
            .iter()
            .rposition(|&w| w != 0)
            .map_or(0, |i| i + 1);
        &self.words[..end]
    }
}

// Trailing zero words do not change the set.
impl PartialEq for BitSet {
    fn eq(&self, other: &Self) -> bool {
        self.trimmed() == other.trimmed()
    }
}

impl Eq for BitSet {}

impl VertexSet for BitSet {
    fn with_order(order: usize) -> Self {
        Self::with_capacity(order)
    }

    fn insert(&mut self, v: usize) {
        let (word, bit) = (v / WORD_BITS, v % WORD_BITS);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1u64 << bit;
    }

    fn remove(&mut self, v: usize) {
        let (word, bit) = (v / WORD_BITS, v % WORD_BITS);
        if let Some(w) = self.words.get_mut(word) {
            *w &= !(1u64 << bit);
        }
    }

    fn contains(&self, v: usize) -> bool {
        let (word, bit) = (v / WORD_BITS, v % WORD_BITS);
        self.words
            .get(word)
            .is_some_and(|w| w & (1u64 << bit) != 0)
    }

    fn union_with(&mut self, other: &Self) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a |= *b;
        }
    }

    fn intersects(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0)
    }

    fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    fn to_vec(&self) -> Vec<usize> {
        self.ones().collect()
    }
}

pub struct Ones<'a> {
    words: &'a [u64],
    word_idx: usize,
    current: u64,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.word_idx * WORD_BITS + bit);
            }
            self.word_idx += 1;
            self.current = *self.words.get(self.word_idx)?;
        }
    }
}

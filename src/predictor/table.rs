//! A table of predictor entries indexed by an address computed elsewhere.
//!
//! Every concrete predictor variant is responsible for computing its own
//! address (from the PC alone, from history, or from both); the table
//! itself only owns storage and the power-of-two index mask.

use crate::predictor::counter::WeakableCounter;

/// Shared behavior for a fixed-size table of predictor entries.
pub trait PredictorTable {
    type Entry;

    /// Number of entries in the table. Always a power of two.
    fn size(&self) -> usize;

    /// Mask that reduces any `usize` address down to a valid index.
    fn index_mask(&self) -> usize {
        assert!(self.size().is_power_of_two());
        self.size() - 1
    }

    fn entry(&self, idx: usize) -> &Self::Entry;
    fn entry_mut(&mut self, idx: usize) -> &mut Self::Entry;
}

/// A pattern history table: an array of [`WeakableCounter`] indexed by some
/// address function over the PC and/or history registers.
#[derive(Clone, Debug)]
pub struct PatternHistoryTable {
    size: usize,
    index_bits: u32,
    data: Vec<WeakableCounter>,
}
impl PatternHistoryTable {
    /// `size` must be a positive power of two. Every entry starts as a
    /// `counter_bits`-wide weakable counter initialized to `init`.
    pub fn new(size: usize, counter_bits: u32, init: u8) -> Self {
        assert!(size > 0 && size.is_power_of_two(), "pht_size must be a positive power of two");
        Self {
            size,
            index_bits: size.trailing_zeros(),
            data: vec![WeakableCounter::new(counter_bits, init); size],
        }
    }

    /// `ceil(log2(size))`, the number of address bits this table consumes.
    pub fn index_bits(&self) -> u32 { self.index_bits }
}
impl PredictorTable for PatternHistoryTable {
    type Entry = WeakableCounter;

    fn size(&self) -> usize { self.size }

    fn entry(&self, idx: usize) -> &WeakableCounter {
        &self.data[idx & self.index_mask()]
    }

    fn entry_mut(&mut self, idx: usize) -> &mut WeakableCounter {
        &mut self.data[idx & self.index_mask()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_wrap_via_index_mask() {
        let pht = PatternHistoryTable::new(4, 2, 0);
        assert_eq!(pht.index_bits(), 2);
        // Index 4 aliases index 0 since the table only has 4 entries.
        assert_eq!(pht.entry(4).state(), pht.entry(0).state());
    }

    #[test]
    #[should_panic]
    fn rejects_non_power_of_two_size() {
        PatternHistoryTable::new(3, 2, 0);
    }
}

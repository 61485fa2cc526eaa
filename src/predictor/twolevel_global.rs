//! Two-level adaptive predictor indexed purely by global history.

use crate::Outcome;
use crate::history::ShiftRegister;
use crate::predictor::{BranchPredictor, Prediction, PredictorTable};
use crate::predictor::table::PatternHistoryTable;
use crate::stats::PredictorStats;

/// Indexed by the integer value of a global history register (GHR); the PC
/// itself never enters the address. Subclassed by [`crate::predictor::GShare`],
/// which folds the PC back in via XOR.
pub struct TwoLevelGlobal {
    pht: PatternHistoryTable,
    ghr: ShiftRegister,
    stats: PredictorStats,
}
impl TwoLevelGlobal {
    pub fn new(pht_size: usize, counter_bits: u32, init: u8) -> Self {
        let pht = PatternHistoryTable::new(pht_size, counter_bits, init);
        let ghr = ShiftRegister::new(pht.index_bits() as usize);
        Self { pht, ghr, stats: PredictorStats::new() }
    }

    /// Address function, overridden by GShare to fold in the PC.
    fn address(&self, _pc: u64) -> usize {
        self.ghr.value() as usize
    }

    pub fn ghr(&self) -> &ShiftRegister { &self.ghr }
}
impl BranchPredictor for TwoLevelGlobal {
    fn name(&self) -> &'static str { "TwoLevelGlobal" }

    fn predict_and_update(&mut self, pc: u64, outcome: Outcome) -> Prediction {
        let idx = self.address(pc);
        let prediction = self.pht.entry(idx).soft_state();
        self.stats.record(prediction, outcome);
        // The GHR must be updated between the read and the counter update:
        // the counter that gets updated is still the one the prediction came
        // from, but any later event in this same trace sees the new history.
        self.ghr.shift_in(outcome.into());
        self.pht.entry_mut(idx).update(outcome);
        prediction
    }

    fn stats(&self) -> &PredictorStats { &self.stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ghr_width_matches_pht_index_bits() {
        let p = TwoLevelGlobal::new(8, 2, 0);
        assert_eq!(p.ghr().width(), 3);
    }

    #[test]
    fn all_zero_ghr_addresses_the_same_entry_as_onelevel() {
        // With an all-zero GHR, address() always resolves to entry 0 regardless
        // of PC, exactly like OneLevel addressing PC=0.
        let mut p = TwoLevelGlobal::new(4, 2, 0);
        let a = p.predict_and_update(7, Outcome::N);
        let b = p.predict_and_update(7, Outcome::N);
        assert_eq!(a, Prediction::NotTaken);
        assert_eq!(b, Prediction::NotTaken);
    }
}

//! The simplest PHT-backed predictor: address is just the low bits of PC.

use crate::Outcome;
use crate::history::bit_slice;
use crate::predictor::{BranchPredictor, Prediction, PredictorTable};
use crate::predictor::table::PatternHistoryTable;
use crate::stats::PredictorStats;

/// Indexed purely by `PC mod pht_size`; no history register at all.
pub struct OneLevel {
    pht: PatternHistoryTable,
    stats: PredictorStats,
}
impl OneLevel {
    pub fn new(pht_size: usize, counter_bits: u32, init: u8) -> Self {
        Self { pht: PatternHistoryTable::new(pht_size, counter_bits, init), stats: PredictorStats::new() }
    }

    fn address(&self, pc: u64) -> usize {
        bit_slice(pc as u128, self.pht.index_bits(), 0) as usize
    }
}
impl BranchPredictor for OneLevel {
    fn name(&self) -> &'static str { "OneLevel" }

    fn predict_and_update(&mut self, pc: u64, outcome: Outcome) -> Prediction {
        let idx = self.address(pc);
        let prediction = self.pht.entry(idx).soft_state();
        self.stats.record(prediction, outcome);
        self.pht.entry_mut(idx).update(outcome);
        prediction
    }

    fn stats(&self) -> &PredictorStats { &self.stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_taken_sequence_climbs_through_the_weak_band() {
        // 2-bit counter, init 0: states visited for prediction are 0,1,2,3.
        // Midpoint M=2, so the weak band {1,2} covers the middle two states.
        let mut p = OneLevel::new(4, 2, 0);
        let mut predictions = Vec::new();
        for _ in 0..4 {
            predictions.push(p.predict_and_update(0, Outcome::T));
        }
        assert_eq!(
            predictions,
            [Prediction::NotTaken, Prediction::Unknown, Prediction::Unknown, Prediction::Taken]
        );
        assert_eq!(p.stats().good, 1);
        assert_eq!(p.stats().miss, 1);
        assert_eq!(p.stats().none, 2);
    }

    #[test]
    fn oscillating_sequence_never_reaches_strong_taken() {
        let mut p = OneLevel::new(4, 2, 0);
        let outcomes = [Outcome::T, Outcome::N, Outcome::T, Outcome::N];
        let mut predictions = Vec::new();
        for o in outcomes {
            predictions.push(p.predict_and_update(0, o));
        }
        assert!(predictions.iter().all(|pr| matches!(pr, Prediction::NotTaken | Prediction::Unknown)));
        assert_eq!(p.stats().miss, 2);
        assert_eq!(p.stats().none, 2);
    }
}

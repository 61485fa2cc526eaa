//! Tournament: arbitrates between two sub-predictors via a per-PC
//! meta-counter that learns which of the two tends to be right.

use crate::Outcome;
use crate::history::bit_slice;
use crate::predictor::{BranchPredictor, GShare, OneLevel, Prediction};
use crate::predictor::counter::SaturatingCounter;
use crate::stats::PredictorStats;

/// `meta_counters` is a plain saturating (hard-state) table: unlike every
/// other table in this crate it never reports "weak", since the choice
/// between the two sub-predictors must always be a concrete 0/1.
pub struct Tournament {
    gshare: GShare,
    one_level: OneLevel,
    meta_counters: Vec<SaturatingCounter>,
    meta_index_bits: u32,
    stats: PredictorStats,
}
impl Tournament {
    pub fn new(pht_size: usize, counter_bits: u32, init: u8) -> Self {
        assert!(pht_size > 0 && pht_size.is_power_of_two(), "pht_size must be a positive power of two");
        Self {
            gshare: GShare::new(pht_size, counter_bits, init),
            one_level: OneLevel::new(pht_size, counter_bits, init),
            meta_counters: vec![SaturatingCounter::new(counter_bits, init); pht_size],
            meta_index_bits: pht_size.trailing_zeros(),
            stats: PredictorStats::new(),
        }
    }

    fn meta_index(&self, pc: u64) -> usize {
        bit_slice(pc as u128, self.meta_index_bits, 0) as usize
    }
}
impl BranchPredictor for Tournament {
    fn name(&self) -> &'static str { "Tournament" }

    fn predict_and_update(&mut self, pc: u64, outcome: Outcome) -> Prediction {
        let meta_idx = self.meta_index(pc);
        // 0 selects GShare, 1 selects OneLevel.
        let selects_one_level = self.meta_counters[meta_idx].hard_state() == Outcome::T;

        // Both sub-predictors always run, whether or not they were chosen,
        // so both keep learning from every event.
        let gshare_prediction = self.gshare.predict_and_update(pc, outcome);
        let one_level_prediction = self.one_level.predict_and_update(pc, outcome);

        let chosen = if selects_one_level { one_level_prediction } else { gshare_prediction };
        self.stats.record(chosen, outcome);

        if gshare_prediction != one_level_prediction {
            if gshare_prediction.matches(outcome) {
                self.meta_counters[meta_idx].bump_down();
            } else if one_level_prediction.matches(outcome) {
                self.meta_counters[meta_idx].bump_up();
            }
        }

        chosen
    }

    fn stats(&self) -> &PredictorStats { &self.stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_counter_only_moves_when_one_subpredictor_is_concretely_right() {
        // pht=2, trace of four (pc=0, T) events: for the first three events
        // the two sub-predictors either agree or are both weak, so the
        // meta-counter holds at its initial state. Only on the fourth event
        // does OneLevel reach a concrete Taken prediction while GShare is
        // still weak, which nudges the meta-counter toward OneLevel.
        let mut p = Tournament::new(2, 2, 0);
        for _ in 0..3 {
            p.predict_and_update(0, Outcome::T);
            assert_eq!(p.meta_counters[0].state(), 0);
        }
        p.predict_and_update(0, Outcome::T);
        assert_eq!(p.meta_counters[0].state(), 1);
    }

    #[test]
    fn forced_meta_extreme_tracks_chosen_subpredictor() {
        let mut tournament = Tournament::new(4, 2, 0);
        let mut reference = OneLevel::new(4, 2, 0);
        let trace = [Outcome::T, Outcome::N, Outcome::T];
        for outcome in trace {
            // Re-pin the meta-counter to its saturated extreme before every
            // event, so OneLevel is chosen no matter how the previous event
            // nudged it.
            for c in tournament.meta_counters.iter_mut() {
                c.set_state(3);
            }
            let chosen = tournament.predict_and_update(0, outcome);
            let expected = reference.predict_and_update(0, outcome);
            assert_eq!(chosen, expected);
        }
    }
}

//! A sum type over every predictor variant.
//!
//! The source models this with class inheritance and a shared base class;
//! here the driver builds one concrete variant from configuration and
//! dispatches through a plain `match`, with no trait object and no shared
//! mutable base state beyond what each variant already owns.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Method;
use crate::predictor::{BranchPredictor, GShare, OneLevel, Prediction, Tournament, TwoLevelGlobal, TwoLevelLocal, TAGE};
use crate::stats::PredictorStats;
use crate::Outcome;

pub enum PredictorKind {
    OneLevel(OneLevel),
    TwoLevelGlobal(TwoLevelGlobal),
    GShare(GShare),
    TwoLevelLocal(TwoLevelLocal),
    Tournament(Tournament),
    Tage(TAGE<StdRng>),
}
impl PredictorKind {
    pub fn build(method: Method, pht_size: usize, counter_bits: u32, init: u8, seed: Option<u64>) -> Self {
        match method {
            Method::OneLevel => PredictorKind::OneLevel(OneLevel::new(pht_size, counter_bits, init)),
            Method::TwoLevelGlobal => PredictorKind::TwoLevelGlobal(TwoLevelGlobal::new(pht_size, counter_bits, init)),
            Method::GShare => PredictorKind::GShare(GShare::new(pht_size, counter_bits, init)),
            Method::TwoLevelLocal => PredictorKind::TwoLevelLocal(TwoLevelLocal::new(pht_size, counter_bits, init)),
            Method::Tournament => PredictorKind::Tournament(Tournament::new(pht_size, counter_bits, init)),
            Method::Tage => PredictorKind::Tage(match seed {
                Some(s) => TAGE::seeded(counter_bits, init, s),
                None => TAGE::new(counter_bits, init),
            }),
        }
    }
}
impl BranchPredictor for PredictorKind {
    fn name(&self) -> &'static str {
        match self {
            PredictorKind::OneLevel(p) => p.name(),
            PredictorKind::TwoLevelGlobal(p) => p.name(),
            PredictorKind::GShare(p) => p.name(),
            PredictorKind::TwoLevelLocal(p) => p.name(),
            PredictorKind::Tournament(p) => p.name(),
            PredictorKind::Tage(p) => p.name(),
        }
    }

    fn predict_and_update(&mut self, pc: u64, outcome: Outcome) -> Prediction {
        match self {
            PredictorKind::OneLevel(p) => p.predict_and_update(pc, outcome),
            PredictorKind::TwoLevelGlobal(p) => p.predict_and_update(pc, outcome),
            PredictorKind::GShare(p) => p.predict_and_update(pc, outcome),
            PredictorKind::TwoLevelLocal(p) => p.predict_and_update(pc, outcome),
            PredictorKind::Tournament(p) => p.predict_and_update(pc, outcome),
            PredictorKind::Tage(p) => p.predict_and_update(pc, outcome),
        }
    }

    fn stats(&self) -> &PredictorStats {
        match self {
            PredictorKind::OneLevel(p) => p.stats(),
            PredictorKind::TwoLevelGlobal(p) => p.stats(),
            PredictorKind::GShare(p) => p.stats(),
            PredictorKind::TwoLevelLocal(p) => p.stats(),
            PredictorKind::Tournament(p) => p.stats(),
            PredictorKind::Tage(p) => p.stats(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_the_requested_variant() {
        let p = PredictorKind::build(Method::GShare, 4, 2, 0, None);
        assert_eq!(p.name(), "GShare");
    }

    #[test]
    fn tage_seed_is_threaded_through() {
        let p = PredictorKind::build(Method::Tage, 4096, 2, 0, Some(42));
        assert_eq!(p.name(), "TAGE");
    }
}

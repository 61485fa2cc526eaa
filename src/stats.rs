//! Shared accounting for every predictor variant.

use crate::Outcome;
use crate::predictor::Prediction;

/// The three-way accounting every predictor produces on every event: a
/// prediction either agrees with the actual outcome (`good`), disagrees
/// while still being a concrete direction (`miss`), or came from a counter
/// in its weak/unknown band (`none`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PredictorStats {
    pub good: u64,
    pub miss: u64,
    pub none: u64,
}
impl PredictorStats {
    pub fn new() -> Self { Self::default() }

    /// Classify `prediction` against `outcome` and bump exactly one counter.
    pub fn record(&mut self, prediction: Prediction, outcome: Outcome) {
        if prediction.matches(outcome) {
            self.good += 1;
        } else if prediction.disagrees(outcome) {
            self.miss += 1;
        } else {
            self.none += 1;
        }
    }

    pub fn total(&self) -> u64 { self.good + self.miss + self.none }

    /// Hit rate as a percentage, `0.0` when no events have been recorded.
    pub fn hit_rate(&self) -> f64 {
        if self.total() == 0 { 0.0 } else { self.good as f64 / self.total() as f64 * 100.0 }
    }

    /// Miss rate as a percentage, `0.0` when no events have been recorded.
    pub fn miss_rate(&self) -> f64 {
        if self.total() == 0 { 0.0 } else { self.miss as f64 / self.total() as f64 * 100.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_increments_total_by_one() {
        let mut stats = PredictorStats::new();
        let events = [
            (Prediction::Taken, Outcome::T),
            (Prediction::Taken, Outcome::N),
            (Prediction::Unknown, Outcome::T),
            (Prediction::NotTaken, Outcome::N),
        ];
        for (i, (p, o)) in events.iter().enumerate() {
            stats.record(*p, *o);
            assert_eq!(stats.total(), (i + 1) as u64);
        }
        assert_eq!(stats.good, 2);
        assert_eq!(stats.miss, 1);
        assert_eq!(stats.none, 1);
    }

    #[test]
    fn rates_are_zero_with_no_events() {
        let stats = PredictorStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.miss_rate(), 0.0);
    }
}

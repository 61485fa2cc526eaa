//! Branch prediction algorithms, built from shared primitives and tables.
//!
//! `PredictorTable` and `Prediction` are the seams every variant is built
//! on: a table maps some addressing input to a counter entry, and every
//! entry's query collapses to a three-valued `Prediction` so "no confident
//! prediction" is a first-class outcome rather than a sentinel.

pub mod counter;
pub mod table;
pub mod onelevel;
pub mod twolevel_global;
pub mod gshare;
pub mod twolevel_local;
pub mod tournament;
pub mod tage;
pub mod kind;

pub use counter::*;
pub use table::*;
pub use onelevel::*;
pub use twolevel_global::*;
pub use gshare::*;
pub use twolevel_local::*;
pub use tournament::*;
pub use tage::*;
pub use kind::*;

use crate::Outcome;

/// A predictor's guess at a branch outcome: a concrete direction, or "no
/// confident prediction" when the underlying counter sits in its weak band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prediction {
    Taken,
    NotTaken,
    Unknown,
}
impl Prediction {
    /// `true` when this is a concrete direction equal to `outcome`.
    pub fn matches(&self, outcome: Outcome) -> bool {
        matches!(
            (self, outcome),
            (Prediction::Taken, Outcome::T) | (Prediction::NotTaken, Outcome::N)
        )
    }

    /// `true` when this is a concrete direction that disagrees with `outcome`.
    pub fn disagrees(&self, outcome: Outcome) -> bool {
        !matches!(self, Prediction::Unknown) && !self.matches(outcome)
    }
}
impl From<Outcome> for Prediction {
    fn from(o: Outcome) -> Self {
        match o {
            Outcome::T => Prediction::Taken,
            Outcome::N => Prediction::NotTaken,
        }
    }
}

/// Interface implemented by every predictor variant driven by the
/// simulation loop: given a branch event, produce a prediction and update
/// internal state from the actual outcome.
pub trait BranchPredictor {
    /// Human-readable method name, as reported in the final summary.
    fn name(&self) -> &'static str;

    /// Predict the direction of the branch at `pc`, then update all
    /// internal state (tables, history registers, statistics) using the
    /// actual `outcome`. Returns the prediction that was made *before* the
    /// update.
    fn predict_and_update(&mut self, pc: u64, outcome: Outcome) -> Prediction;

    /// Shared good/miss/none accounting collected so far.
    fn stats(&self) -> &crate::stats::PredictorStats;
}

//! Saturating and weakable n-bit state-machine counters.
//!
//! Both clamp in place at their endpoints: a `bump_up`/`bump_down` past the
//! limit is a no-op, never a wraparound. The decision band used by
//! [`WeakableCounter::soft_state`] is intentionally asymmetric (a single
//! "weak" state just below the midpoint) and must stay bit-for-bit exact,
//! since TAGE's allocation policy depends on it.

use crate::Outcome;
use crate::predictor::Prediction;

/// An n-bit up/down saturating counter.
///
/// `hard_state()` treats the counter as a plain 0/1 predictor: taken once
/// the state reaches the midpoint `M = 2^(bits-1)`, not-taken below it.
#[derive(Clone, Copy, Debug)]
pub struct SaturatingCounter {
    bits: u32,
    init: u8,
    state: u8,
}
impl SaturatingCounter {
    pub fn new(bits: u32, init: u8) -> Self {
        assert!(bits >= 1 && bits <= 8, "counter width must fit a u8 state with a midpoint");
        let max = Self::max_for(bits);
        assert!(init <= max, "initial state {init} exceeds {bits}-bit range [0, {max}]");
        Self { bits, init, state: init }
    }

    fn max_for(bits: u32) -> u8 {
        ((1u32 << bits) - 1) as u8
    }

    fn max(&self) -> u8 { Self::max_for(self.bits) }

    /// The midpoint `M = 2^(bits-1)`.
    pub fn midpoint(&self) -> u8 { (1u32 << (self.bits - 1)) as u8 }

    pub fn bits(&self) -> u32 { self.bits }
    pub fn state(&self) -> u8 { self.state }

    /// Increment, saturating at `2^bits - 1`.
    pub fn bump_up(&mut self) {
        if self.state < self.max() {
            self.state += 1;
        }
    }

    /// Decrement, saturating at `0`.
    pub fn bump_down(&mut self) {
        if self.state > 0 {
            self.state -= 1;
        }
    }

    /// Force the state directly, clamped to the valid range.
    pub fn set_state(&mut self, state: u8) {
        self.state = state.min(self.max());
    }

    pub fn reset(&mut self) {
        self.state = self.init;
    }

    /// `1` if the state is at or above the midpoint, else `0`.
    pub fn hard_state(&self) -> Outcome {
        Outcome::from(self.state >= self.midpoint())
    }

    /// Update the counter with the actual branch outcome.
    pub fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::T => self.bump_up(),
            Outcome::N => self.bump_down(),
        }
    }
}

/// An n-bit saturating counter with a "weak/unknown" band at the midpoint.
///
/// `soft_state()` is `Taken` when the state is strictly above `M`, `NotTaken`
/// when strictly below `M - 1`, and `Unknown` for the single state `M - 1`
/// or `M` in between — i.e. the two states closest to the midpoint both
/// count as "no confident prediction".
#[derive(Clone, Copy, Debug)]
pub struct WeakableCounter {
    ctr: SaturatingCounter,
}
impl WeakableCounter {
    pub fn new(bits: u32, init: u8) -> Self {
        Self { ctr: SaturatingCounter::new(bits, init) }
    }

    pub fn state(&self) -> u8 { self.ctr.state() }
    pub fn bump_up(&mut self) { self.ctr.bump_up() }
    pub fn bump_down(&mut self) { self.ctr.bump_down() }
    pub fn set_state(&mut self, state: u8) { self.ctr.set_state(state) }
    pub fn reset(&mut self) { self.ctr.reset() }
    pub fn update(&mut self, outcome: Outcome) { self.ctr.update(outcome) }

    /// `Taken` above the midpoint, `NotTaken` below `M - 1`, `Unknown`
    /// for the weak band in between.
    pub fn soft_state(&self) -> Prediction {
        let m = self.ctr.midpoint();
        let state = self.ctr.state();
        if state > m {
            Prediction::Taken
        } else if state < m - 1 {
            Prediction::NotTaken
        } else {
            Prediction::Unknown
        }
    }
}

//! Test utilities for flatperm development.
//!
//! Deterministic [`UniformSource`] implementations for driving the growth
//! engine through hand-computable traces:
//!
//! - [`FloorFirstSource`]: always rounds ratios down, always picks the
//!   first legal neighbour.
//! - [`ConstantSource`]: returns the same draw forever.
//! - [`ScriptedSource`]: replays a fixed list of draws, then panics.
//! - [`CountingSource`]: wraps another source and counts draws.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::VecDeque;

use flatperm_core::UniformSource;

/// Rounds every fractional ratio down and always extends to the first
/// legal neighbour in step order.
///
/// The uniform draw is the largest `f64` below 1.0, so `r < frac` holds
/// only for fractional parts indistinguishable from 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloorFirstSource;

impl UniformSource for FloorFirstSource {
    fn uniform(&mut self) -> f64 {
        1.0 - f64::EPSILON
    }

    fn index(&mut self, _bound: usize) -> usize {
        0
    }
}

/// Returns `value` for every uniform draw.
///
/// Indices are derived from the draw by the trait's default scaling.
#[derive(Clone, Copy, Debug)]
pub struct ConstantSource {
    value: f64,
}

impl ConstantSource {
    pub fn new(value: f64) -> Self {
        assert!((0.0..1.0).contains(&value), "draw {value} outside [0, 1)");
        Self { value }
    }
}

impl UniformSource for ConstantSource {
    fn uniform(&mut self) -> f64 {
        self.value
    }
}

/// Replays a scripted sequence of uniform draws.
///
/// Panics when the script runs out, so a test that expects a fixed
/// number of draws fails loudly if the engine draws more.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    draws: VecDeque<f64>,
    consumed: usize,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Draws still queued.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    /// Draws handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl UniformSource for ScriptedSource {
    fn uniform(&mut self) -> f64 {
        match self.draws.pop_front() {
            Some(u) => {
                self.consumed += 1;
                u
            }
            None => panic!("scripted source exhausted after {} draws", self.consumed),
        }
    }
}

/// Counts the draws made through it.
#[derive(Clone, Debug, Default)]
pub struct CountingSource<S> {
    inner: S,
    uniform_draws: u64,
    index_draws: u64,
}

impl<S: UniformSource> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            uniform_draws: 0,
            index_draws: 0,
        }
    }

    pub fn uniform_draws(&self) -> u64 {
        self.uniform_draws
    }

    pub fn index_draws(&self) -> u64 {
        self.index_draws
    }

    pub fn total_draws(&self) -> u64 {
        self.uniform_draws + self.index_draws
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: UniformSource> UniformSource for CountingSource<S> {
    fn uniform(&mut self) -> f64 {
        self.uniform_draws += 1;
        self.inner.uniform()
    }

    fn index(&mut self, bound: usize) -> usize {
        self.index_draws += 1;
        self.inner.index(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_first_picks_first_neighbour() {
        let mut s = FloorFirstSource;
        assert_eq!(s.index(4), 0);
        assert!(s.uniform() < 1.0);
    }

    #[test]
    fn scripted_replays_in_order() {
        let mut s = ScriptedSource::new([0.1, 0.6]);
        assert_eq!(s.uniform(), 0.1);
        assert_eq!(s.index(2), 1);
        assert_eq!(s.remaining(), 0);
        assert_eq!(s.consumed(), 2);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn scripted_panics_when_empty() {
        ScriptedSource::new(std::iter::empty()).uniform();
    }

    #[test]
    fn counting_separates_draw_kinds() {
        let mut s = CountingSource::new(ConstantSource::new(0.5));
        s.uniform();
        s.index(3);
        s.index(3);
        assert_eq!((s.uniform_draws(), s.index_draws(), s.total_draws()), (1, 2, 3));
    }
}

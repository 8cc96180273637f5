//! Weight bookkeeping and the prune/enrich decision.
//!
//! Every time the walk arrives at a new depth, its Rosenbluth weight is
//! compared with the running estimate of the target weight for its
//! histogram cell. The ratio, stochastically rounded, is the number of
//! copies of the walk to grow from this depth: zero prunes it, one keeps
//! it, more enriches it. Each copy then carries the target weight, which
//! keeps the estimator unbiased and the histogram flat.

use flatperm_core::{RunError, UniformSource};

use crate::config::{ConfigError, Normalization};
use crate::histogram::Histogram;

// ── WeightLedger ───────────────────────────────────────────────────

/// Per-depth scratch state of the in-flight walk.
///
/// `weight(d)` is the Rosenbluth weight of the walk when it sits at depth
/// `d`; `copies(d)` is how many more extensions are still to be grown
/// from depth `d` before it retracts past it.
#[derive(Clone, Debug)]
pub struct WeightLedger {
    weights: Vec<f64>,
    copies: Vec<u64>,
}

impl WeightLedger {
    /// A ledger for depths `0..=max_depth`, origin weight 1.
    pub fn new(max_depth: usize) -> Self {
        let mut weights = vec![0.0; max_depth + 1];
        weights[0] = 1.0;
        Self {
            weights,
            copies: vec![0; max_depth + 1],
        }
    }

    /// Weight at `depth`.
    pub fn weight(&self, depth: usize) -> f64 {
        self.weights.get(depth).copied().unwrap_or(0.0)
    }

    /// Remaining copies at `depth`.
    pub fn copies(&self, depth: usize) -> u64 {
        self.copies.get(depth).copied().unwrap_or(0)
    }

    /// Overwrite the weight at `depth`.
    pub fn set_weight(&mut self, depth: usize, weight: f64) {
        self.ensure(depth);
        self.weights[depth] = weight;
    }

    /// Overwrite the remaining copies at `depth`.
    pub fn set_copies(&mut self, depth: usize, copies: u64) {
        self.ensure(depth);
        self.copies[depth] = copies;
    }

    /// Spend one copy at `depth`.
    pub fn take_copy(&mut self, depth: usize) {
        if let Some(c) = self.copies.get_mut(depth) {
            *c = c.saturating_sub(1);
        }
    }

    fn ensure(&mut self, depth: usize) {
        if depth >= self.weights.len() {
            self.weights.resize(depth + 1, 0.0);
            self.copies.resize(depth + 1, 0);
        }
    }
}

// ── WeightEstimator ────────────────────────────────────────────────

/// Owns the histogram and the weight ledger, and decides copy counts.
#[derive(Clone, Debug)]
pub struct WeightEstimator {
    histogram: Histogram,
    ledger: WeightLedger,
    normalization: Normalization,
    growth_batch: u64,
}

impl WeightEstimator {
    /// A zeroed estimator for primary values up to `max_size` and raw
    /// depths up to `max_depth`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TableTooLarge`] if the histogram cannot be allocated.
    pub fn new(
        max_size: usize,
        max_depth: usize,
        normalization: Normalization,
        growth_batch: u64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            histogram: Histogram::new(max_size)?,
            ledger: WeightLedger::new(max_depth),
            normalization,
            growth_batch,
        })
    }

    /// The accumulating histogram.
    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// The per-depth ledger.
    pub fn ledger(&self) -> &WeightLedger {
        &self.ledger
    }

    /// Remaining copies at `depth`.
    pub fn copies(&self, depth: usize) -> u64 {
        self.ledger.copies(depth)
    }

    /// Weight at `depth`.
    pub fn weight(&self, depth: usize) -> f64 {
        self.ledger.weight(depth)
    }

    /// Start a tour: one copy at the origin and one origin visit carrying
    /// the current origin weight.
    pub fn seed_origin(&mut self) -> Result<(), RunError> {
        self.ledger.set_copies(0, 1);
        self.histogram.record(0, 0, self.ledger.weight(0))
    }

    /// Force a prune at `depth` (ceiling reached or dead end).
    pub fn stop(&mut self, depth: usize) {
        self.ledger.set_copies(depth, 0);
    }

    /// Spend one copy at `depth` on an extension.
    pub fn take_copy(&mut self, depth: usize) {
        self.ledger.take_copy(depth);
    }

    /// Record the walk's arrival at `depth` in cell `(primary, secondary)`
    /// after growing from an atmosphere of size `atmosphere`.
    pub fn record_extension(
        &mut self,
        depth: usize,
        primary: usize,
        secondary: usize,
        atmosphere: usize,
    ) -> Result<(), RunError> {
        let weight = self.ledger.weight(depth - 1) * atmosphere as f64;
        self.ledger.set_weight(depth, weight);
        self.histogram.record(primary, secondary, weight)
    }

    /// Target weight of cell `(primary, secondary)` with `tours` tours
    /// counted, including the current one.
    pub fn target_weight(&self, primary: usize, secondary: usize, tours: u64) -> Result<f64, RunError> {
        let sum = self.histogram.weight_sum(primary, secondary)?;
        let denom = self
            .normalization
            .tours_for_row(primary, tours as f64, self.growth_batch);
        Ok(sum / denom)
    }

    /// Decide how many copies to grow from `depth`.
    ///
    /// `completed_tours` is the number of tours finished before the current
    /// one. Draws exactly one value from `source`. The walk's weight at
    /// `depth` is replaced by the target weight, and the copy count is
    /// stored in the ledger and returned.
    ///
    /// # Errors
    ///
    /// [`RunError::NonFiniteWeight`] if the ratio of the walk's weight to
    /// the target is NaN or infinite.
    pub fn decide<S: UniformSource>(
        &mut self,
        depth: usize,
        primary: usize,
        secondary: usize,
        completed_tours: u64,
        source: &mut S,
    ) -> Result<u64, RunError> {
        let target = self.target_weight(primary, secondary, completed_tours + 1)?;
        let ratio = self.ledger.weight(depth) / target;
        if !ratio.is_finite() {
            return Err(RunError::NonFiniteWeight {
                primary,
                secondary,
                ratio,
            });
        }
        let whole = ratio.floor();
        let frac = ratio - whole;
        let r = source.uniform();
        let copies = whole as u64 + u64::from(r < frac);
        self.ledger.set_copies(depth, copies);
        self.ledger.set_weight(depth, target);
        Ok(copies)
    }

    /// Mutable access for the normaliser.
    pub(crate) fn histogram_mut(&mut self) -> &mut Histogram {
        &mut self.histogram
    }

    /// Give up the histogram at the end of a run.
    pub fn into_histogram(self) -> Histogram {
        self.histogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatperm_test_utils::{ConstantSource, ScriptedSource};

    fn estimator() -> WeightEstimator {
        WeightEstimator::new(4, 4, Normalization::TotalTours, 10).unwrap()
    }

    #[test]
    fn ledger_grows_on_demand() {
        let mut l = WeightLedger::new(1);
        assert_eq!(l.weight(0), 1.0);
        assert_eq!(l.copies(5), 0);
        l.set_copies(5, 3);
        l.take_copy(5);
        assert_eq!(l.copies(5), 2);
    }

    #[test]
    fn take_copy_saturates_at_zero() {
        let mut l = WeightLedger::new(2);
        l.take_copy(1);
        assert_eq!(l.copies(1), 0);
    }

    #[test]
    fn seed_origin_records_unit_weight() {
        let mut e = estimator();
        e.seed_origin().unwrap();
        assert_eq!(e.copies(0), 1);
        assert_eq!(e.histogram().visit_count(0, 0).unwrap(), 1.0);
        assert_eq!(e.histogram().weight_sum(0, 0).unwrap(), 1.0);
    }

    #[test]
    fn extension_weight_is_parent_times_atmosphere() {
        let mut e = estimator();
        e.record_extension(1, 1, 0, 4).unwrap();
        e.record_extension(2, 2, 0, 3).unwrap();
        assert_eq!(e.weight(2), 12.0);
        assert_eq!(e.histogram().weight_sum(2, 0).unwrap(), 12.0);
    }

    #[test]
    fn integer_ratio_keeps_exact_copies() {
        let mut e = estimator();
        e.seed_origin().unwrap();
        // weight 1, target 1/1 -> ratio 1, no fractional part.
        let copies = e.decide(0, 0, 0, 0, &mut ConstantSource::new(0.0)).unwrap();
        assert_eq!(copies, 1);
        assert_eq!(e.weight(0), 1.0);
    }

    #[test]
    fn fractional_ratio_rounds_stochastically() {
        let mut e = estimator();
        // Cell (1,0) holds 4.0 over 2 tours -> target 2.0; walk weight 5.0.
        e.record_extension(1, 1, 0, 4).unwrap();
        e.ledger.set_weight(1, 5.0);
        let mut src = ScriptedSource::new([0.1, 0.9]);
        // ratio 2.5: r=0.1 < 0.5 rounds up, r=0.9 rounds down.
        assert_eq!(e.decide(1, 1, 0, 1, &mut src).unwrap(), 3);
        e.ledger.set_weight(1, 5.0);
        assert_eq!(e.decide(1, 1, 0, 1, &mut src).unwrap(), 2);
        assert_eq!(e.weight(1), 2.0);
    }

    #[test]
    fn overweight_walk_is_pruned_sometimes() {
        let mut e = estimator();
        e.record_extension(1, 1, 0, 4).unwrap();
        e.ledger.set_weight(1, 1.0);
        // ratio 0.25: survives only if r < 0.25.
        assert_eq!(e.decide(1, 1, 0, 0, &mut ConstantSource::new(0.5)).unwrap(), 0);
        e.ledger.set_weight(1, 1.0);
        assert_eq!(e.decide(1, 1, 0, 0, &mut ConstantSource::new(0.2)).unwrap(), 1);
    }

    #[test]
    fn non_finite_ratio_is_an_error() {
        let mut e = estimator();
        e.record_extension(1, 1, 0, 4).unwrap();
        e.ledger.set_weight(1, f64::INFINITY);
        let err = e.decide(1, 1, 0, 0, &mut ConstantSource::new(0.5)).unwrap_err();
        assert!(matches!(err, RunError::NonFiniteWeight { primary: 1, secondary: 0, .. }));
    }

    #[test]
    fn staged_growth_shrinks_denominator() {
        let mut e = WeightEstimator::new(4, 4, Normalization::StagedGrowth, 10).unwrap();
        e.record_extension(1, 1, 0, 4).unwrap();
        e.record_extension(2, 2, 0, 3).unwrap();
        // 25 tours: row 2 reachable for 25 - 10 = 15 of them.
        assert_eq!(e.target_weight(2, 0, 25).unwrap(), 12.0 / 15.0);
        assert_eq!(e.target_weight(1, 0, 25).unwrap(), 4.0 / 25.0);
    }
}

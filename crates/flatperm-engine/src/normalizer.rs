//! Post-processing of the weight table into a density-of-states estimate.

use flatperm_core::RunError;
use tracing::debug;

use crate::config::Normalization;
use crate::histogram::Histogram;

/// Divides the accumulated weight table by the tour count, once.
///
/// The engine counts the origin of the next tour before it notices the
/// budget is spent, so the origin cell carries one visit and one unit of
/// weight too many. The normaliser removes that first, then divides each
/// row by the tour count chosen by the [`Normalization`] policy.
#[derive(Clone, Copy, Debug)]
pub struct ResultNormalizer {
    normalization: Normalization,
    growth_batch: u64,
}

impl ResultNormalizer {
    /// A normaliser using `normalization` with the run's growth batch.
    pub fn new(normalization: Normalization, growth_batch: u64) -> Self {
        Self {
            normalization,
            growth_batch,
        }
    }

    /// Normalise `histogram` in place.
    ///
    /// # Errors
    ///
    /// - [`RunError::AlreadyNormalized`] on a second call for the same
    ///   tables; division is destructive.
    /// - [`RunError::NoCompletedTours`] if the origin has fewer than two
    ///   visits (the seeded first tour plus its closing re-seed).
    pub fn normalize(&self, histogram: &mut Histogram) -> Result<(), RunError> {
        if histogram.is_normalized() {
            return Err(RunError::AlreadyNormalized);
        }
        if histogram.visit_count(0, 0)? < 2.0 {
            return Err(RunError::NoCompletedTours);
        }
        let width = histogram.width();
        let (visits, weights) = histogram.tables_mut();
        visits[0] -= 1.0;
        weights[0] -= 1.0;
        let tours = visits[0];
        for (primary, row) in weights.chunks_mut(width).enumerate() {
            let denom = self
                .normalization
                .tours_for_row(primary, tours, self.growth_batch);
            for w in row {
                *w /= denom;
            }
        }
        histogram.mark_normalized();
        debug!(tours, policy = ?self.normalization, "weight table normalised");
        Ok(())
    }
}

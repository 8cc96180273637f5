//! The (primary, secondary) histogram tables and the final result type.
//!
//! Both tables are flattened row-major `width x width` arrays of `f64`,
//! `width = max_size + 1`. [`Histogram`] accumulates during a run and is
//! normalised in place exactly once by the
//! [`ResultNormalizer`](crate::ResultNormalizer); it is then converted
//! into an immutable [`DensityOfStates`].

use flatperm_core::{ConfigError, RunError};

/// Accumulating visit-count and weight-sum tables.
#[derive(Clone, Debug)]
pub struct Histogram {
    width: usize,
    visits: Vec<f64>,
    weights: Vec<f64>,
    normalized: bool,
}

impl Histogram {
    /// Zeroed tables for primary and secondary values in `[0, max_size]`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TableTooLarge`] if the cell count overflows `usize`
    /// or either table cannot be allocated.
    pub fn new(max_size: usize) -> Result<Self, ConfigError> {
        let too_large = || ConfigError::TableTooLarge {
            max_size: u32::try_from(max_size).unwrap_or(u32::MAX),
        };
        let width = max_size.checked_add(1).ok_or_else(too_large)?;
        let cells = width.checked_mul(width).ok_or_else(too_large)?;
        Ok(Self {
            width,
            visits: zeroed(cells).ok_or_else(too_large)?,
            weights: zeroed(cells).ok_or_else(too_large)?,
            normalized: false,
        })
    }

    /// Row width (`max_size + 1`).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Flattened index of cell `(primary, secondary)`.
    ///
    /// # Errors
    ///
    /// [`RunError::CellOutOfRange`] if either coordinate exceeds `max_size`.
    pub fn index(&self, primary: usize, secondary: usize) -> Result<usize, RunError> {
        if primary < self.width && secondary < self.width {
            Ok(primary * self.width + secondary)
        } else {
            Err(RunError::CellOutOfRange {
                primary,
                secondary,
                width: self.width,
            })
        }
    }

    /// Add one visit and `weight` to cell `(primary, secondary)`.
    pub fn record(&mut self, primary: usize, secondary: usize, weight: f64) -> Result<(), RunError> {
        let i = self.index(primary, secondary)?;
        self.visits[i] += 1.0;
        self.weights[i] += weight;
        Ok(())
    }

    /// Accumulated weight of cell `(primary, secondary)`.
    pub fn weight_sum(&self, primary: usize, secondary: usize) -> Result<f64, RunError> {
        Ok(self.weights[self.index(primary, secondary)?])
    }

    /// Visit count of cell `(primary, secondary)`.
    pub fn visit_count(&self, primary: usize, secondary: usize) -> Result<f64, RunError> {
        Ok(self.visits[self.index(primary, secondary)?])
    }

    /// Flattened visit-count table.
    pub fn visits(&self) -> &[f64] {
        &self.visits
    }

    /// Flattened weight table.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// `true` once the weight table has been normalised.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub(crate) fn tables_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.visits, &mut self.weights)
    }

    pub(crate) fn mark_normalized(&mut self) {
        self.normalized = true;
    }

    /// Freeze the tables into a [`DensityOfStates`].
    ///
    /// # Errors
    ///
    /// [`RunError::NotNormalized`] if the tables were never normalised;
    /// raw weight sums are not a density-of-states estimate.
    pub fn into_density(self) -> Result<DensityOfStates, RunError> {
        if !self.normalized {
            return Err(RunError::NotNormalized);
        }
        Ok(DensityOfStates {
            width: self.width,
            visits: self.visits,
            weights: self.weights,
        })
    }
}

/// Final tables of a run.
///
/// `visits` counts how often each `(primary, secondary)` cell was entered;
/// `weights` is the normalised Rosenbluth weight, the density-of-states
/// estimate for that cell.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityOfStates {
    width: usize,
    visits: Vec<f64>,
    weights: Vec<f64>,
}

impl DensityOfStates {
    /// Row width (`max_size + 1`).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Largest primary (and secondary) value in the tables.
    pub fn max_size(&self) -> usize {
        self.width - 1
    }

    /// Flattened row-major visit-count table.
    pub fn visits(&self) -> &[f64] {
        &self.visits
    }

    /// Flattened row-major density-of-states table.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Visit count of one cell, `None` if out of range.
    pub fn visit_count(&self, primary: usize, secondary: usize) -> Option<f64> {
        self.cell(primary, secondary).map(|i| self.visits[i])
    }

    /// Estimated density of states of one cell, `None` if out of range.
    pub fn weight(&self, primary: usize, secondary: usize) -> Option<f64> {
        self.cell(primary, secondary).map(|i| self.weights[i])
    }

    /// Density-of-states row for one primary value.
    pub fn weight_row(&self, primary: usize) -> Option<&[f64]> {
        (primary < self.width).then(|| &self.weights[primary * self.width..][..self.width])
    }

    /// Visit-count row for one primary value.
    pub fn visit_row(&self, primary: usize) -> Option<&[f64]> {
        (primary < self.width).then(|| &self.visits[primary * self.width..][..self.width])
    }

    /// Split into `(visits, weights)`.
    pub fn into_tables(self) -> (Vec<f64>, Vec<f64>) {
        (self.visits, self.weights)
    }

    fn cell(&self, primary: usize, secondary: usize) -> Option<usize> {
        (primary < self.width && secondary < self.width).then(|| primary * self.width + secondary)
    }
}

/// A zero-filled table of `cells` entries, or `None` if it cannot be
/// allocated.
fn zeroed(cells: usize) -> Option<Vec<f64>> {
    let mut table = Vec::new();
    table.try_reserve_exact(cells).ok()?;
    table.resize(cells, 0.0);
    Some(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unaddressable_table_is_rejected() {
        // (2^31 + 1)^2 cells of 8 bytes overflow on every pointer width.
        let max_size = 1usize << 31;
        assert_eq!(
            Histogram::new(max_size).unwrap_err(),
            ConfigError::TableTooLarge { max_size: 1 << 31 }
        );
        assert!(Histogram::new(usize::MAX).is_err());
    }

    #[test]
    fn record_accumulates_in_row_major_cell() {
        let mut h = Histogram::new(2).unwrap();
        h.record(1, 2, 3.0).unwrap();
        h.record(1, 2, 0.5).unwrap();
        assert_eq!(h.index(1, 2).unwrap(), 5);
        assert_eq!(h.visit_count(1, 2).unwrap(), 2.0);
        assert_eq!(h.weight_sum(1, 2).unwrap(), 3.5);
        assert_eq!(h.visits().iter().sum::<f64>(), 2.0);
    }

    #[test]
    fn out_of_range_cell_is_an_error() {
        let mut h = Histogram::new(2).unwrap();
        assert_eq!(
            h.record(0, 3, 1.0),
            Err(RunError::CellOutOfRange {
                primary: 0,
                secondary: 3,
                width: 3
            })
        );
        assert!(h.weight_sum(3, 0).is_err());
    }

    #[test]
    fn raw_histogram_cannot_be_frozen() {
        let h = Histogram::new(1).unwrap();
        assert_eq!(h.into_density(), Err(RunError::NotNormalized));
    }

    #[test]
    fn density_rows_slice_the_flat_table() {
        let mut h = Histogram::new(1).unwrap();
        h.record(1, 0, 4.0).unwrap();
        h.mark_normalized();
        let d = h.into_density().unwrap();
        assert_eq!(d.max_size(), 1);
        assert_eq!(d.weight_row(1), Some(&[4.0, 0.0][..]));
        assert_eq!(d.visit_row(0), Some(&[0.0, 0.0][..]));
        assert_eq!(d.weight_row(2), None);
        assert_eq!(d.weight(1, 0), Some(4.0));
        assert_eq!(d.visit_count(0, 5), None);
        let (v, w) = d.into_tables();
        assert_eq!(v, vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(w, vec![0.0, 0.0, 4.0, 0.0]);
    }
}

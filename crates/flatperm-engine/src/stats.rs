//! Counters collected over a run.

use std::time::Duration;

/// Summary of what the growth loop did during a run.
///
/// Purely diagnostic; nothing in the estimator reads these. A high
/// `dead_ends` share signals trapping at the current lengths, a high
/// `enrichments` share that the ceiling recently opened new rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunStats {
    /// Completed tours.
    pub tours: u64,
    /// Growth-ceiling raises over the run.
    pub ceiling: usize,
    /// Successful single-site extensions.
    pub extensions: u64,
    /// Extension attempts that found an empty atmosphere.
    pub dead_ends: u64,
    /// Ratio tests that produced zero copies.
    pub prunes: u64,
    /// Ratio tests that produced more than one copy.
    pub enrichments: u64,
    /// Wall-clock duration of the growth loop and normalisation.
    pub elapsed: Duration,
}

impl RunStats {
    /// Account for one ratio test that produced `copies`.
    pub fn record_decision(&mut self, copies: u64) {
        match copies {
            0 => self.prunes += 1,
            1 => {}
            _ => self.enrichments += 1,
        }
    }
}

//! Run configuration, validation, and the normalisation policy.
//!
//! [`RunConfig`] is the input for constructing a [`FlatPerm`](crate::FlatPerm)
//! engine. [`validate()`](RunConfig::validate) checks the preconditions
//! once at startup; nothing in the growth loop re-checks them.

use flatperm_core::ModelKind;

pub use flatperm_core::ConfigError;

/// Default number of completed tours between growth-ceiling raises.
pub const DEFAULT_GROWTH_BATCH: u64 = 5000;

// ── Normalization ──────────────────────────────────────────────────

/// How many tours a histogram row is normalised by.
///
/// The growth ceiling is raised by one every `growth_batch` tours, so row
/// `p` only becomes reachable once `growth_batch * (p - 1)` tours have
/// completed. The two policies differ in whether they account for that.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Divide every row by the total number of tours.
    ///
    /// Rows that became reachable late are under-weighted in proportion to
    /// the tours they missed.
    #[default]
    TotalTours,
    /// Divide row `p >= 2` by the tours for which it was reachable,
    /// `max(total - growth_batch * (p - 1), 1)`. Rows 0 and 1 use the total.
    StagedGrowth,
}

impl Normalization {
    /// The tour count row `primary` is divided by, given `total` tours.
    ///
    /// Never returns less than 1 when `total >= 1`.
    pub fn tours_for_row(self, primary: usize, total: f64, growth_batch: u64) -> f64 {
        match self {
            Self::TotalTours => total,
            Self::StagedGrowth => {
                if primary < 2 {
                    total
                } else {
                    let missed = growth_batch as f64 * (primary - 1) as f64;
                    (total - missed).max(1.0)
                }
            }
        }
    }
}

// ── RunConfig ──────────────────────────────────────────────────────

/// Parameters of a single flatPERM run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Which walk model to sample.
    pub model: ModelKind,
    /// Largest primary parameter (length or spine length) sampled.
    ///
    /// `0` is allowed and yields an origin-only histogram.
    pub max_size: u32,
    /// Number of tours to run. Must be at least 1.
    pub max_tours: u64,
    /// Completed tours between growth-ceiling raises. Default: 5000.
    pub growth_batch: u64,
    /// Row normalisation policy. Default: [`Normalization::TotalTours`].
    pub normalization: Normalization,
    /// Seed for [`run_seeded`](crate::run_seeded). Default: 0.
    pub seed: u64,
}

impl RunConfig {
    /// A configuration with default growth batch, normalisation and seed.
    pub fn new(model: ModelKind, max_size: u32, max_tours: u64) -> Self {
        Self {
            model,
            max_size,
            max_tours,
            growth_batch: DEFAULT_GROWTH_BATCH,
            normalization: Normalization::default(),
            seed: 0,
        }
    }

    /// Row width of the histogram, `max_size + 1`.
    pub fn width(&self) -> usize {
        (self.max_size as usize).saturating_add(1)
    }

    /// Check the preconditions of a run.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroTours`] if `max_tours == 0`
    /// - [`ConfigError::ZeroGrowthBatch`] if `growth_batch == 0`
    /// - [`ConfigError::TableTooLarge`] if the two flattened histogram
    ///   tables exceed `isize::MAX` bytes, or the cactus raw-length bound
    ///   overflows `usize`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tours == 0 {
            return Err(ConfigError::ZeroTours);
        }
        if self.growth_batch == 0 {
            return Err(ConfigError::ZeroGrowthBatch);
        }
        let too_large = ConfigError::TableTooLarge {
            max_size: self.max_size,
        };
        let width = (self.max_size as usize)
            .checked_add(1)
            .ok_or_else(|| too_large.clone())?;
        // Two f64 tables of width^2 cells, within one allocation's limit.
        width
            .checked_mul(width)
            .and_then(|cells| cells.checked_mul(2 * size_of::<f64>()))
            .filter(|bytes| *bytes <= isize::MAX as usize)
            .ok_or_else(|| too_large.clone())?;
        width
            .checked_mul(3)
            .and_then(|d| d.checked_add(2))
            .ok_or(too_large)?;
        Ok(())
    }
}

//! The flatPERM growth loop.
//!
//! [`FlatPerm`] runs the grow/prune/retract state machine for one
//! [`WalkModel`]. Each iteration of the loop:
//!
//! 1. decides how many copies to grow from the current depth (forced to
//!    zero at the growth ceiling or after a dead end, otherwise the
//!    stochastically rounded weight ratio);
//! 2. if no copies remain, retracts to the nearest depth that still has
//!    copies, or to the origin;
//! 3. at the origin with no copies left, finishes the tour and seeds the
//!    next one; otherwise extends the walk by one uniformly chosen legal
//!    site and records the new cell.
//!
//! The loop ends when the tour budget is spent. The weight table is then
//! normalised once and returned with the visit counts.
//!
//! # Ownership model
//!
//! The engine owns the walk, the tables and the scratch ledger. The
//! random source is borrowed for the duration of [`run`](FlatPerm::run)
//! and is the only external state the loop touches.

use std::time::Instant;

use flatperm_core::{ModelKind, RunError, UniformSource};
use tracing::info;

use crate::config::{ConfigError, RunConfig};
use crate::estimator::WeightEstimator;
use crate::histogram::DensityOfStates;
use crate::model::{CactusModel, InteractingModel, WalkModel};
use crate::normalizer::ResultNormalizer;
use crate::schedule::TourScheduler;
use crate::source::RngSource;
use crate::stats::RunStats;

// ── RunReport ──────────────────────────────────────────────────────

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Visit counts and normalised weights.
    pub density: DensityOfStates,
    /// Counters collected over the run.
    pub stats: RunStats,
}

// ── FlatPerm ───────────────────────────────────────────────────────

/// The flatPERM engine for walk model `M`.
///
/// # Example
///
/// ```
/// use flatperm_engine::{CactusModel, FlatPerm, ModelKind, RngSource, RunConfig};
///
/// let mut config = RunConfig::new(ModelKind::Cactus, 4, 100);
/// config.growth_batch = 10;
/// let engine = FlatPerm::<CactusModel>::new(config).unwrap();
/// let report = engine.run(RngSource::seeded(3)).unwrap();
/// assert_eq!(report.stats.tours, 100);
/// ```
#[derive(Debug)]
pub struct FlatPerm<M: WalkModel> {
    config: RunConfig,
    model: M,
    estimator: WeightEstimator,
    scheduler: TourScheduler,
    stats: RunStats,
    /// Atmosphere size of the most recent extension attempt.
    last_atmosphere: usize,
}

impl<M: WalkModel> FlatPerm<M> {
    /// Validate `config` and build an engine positioned before the first
    /// tour.
    ///
    /// # Errors
    ///
    /// Any [`RunConfig::validate`] error, [`ConfigError::ModelMismatch`]
    /// if `config.model` is not `M`'s model, or
    /// [`ConfigError::TableTooLarge`] if the histogram cannot be allocated.
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if config.model != M::KIND {
            return Err(ConfigError::ModelMismatch {
                configured: config.model,
                engine: M::KIND,
            });
        }
        let max_size = config.max_size as usize;
        Ok(Self {
            model: M::new(max_size),
            estimator: WeightEstimator::new(
                max_size,
                M::max_depth(max_size),
                config.normalization,
                config.growth_batch,
            )?,
            scheduler: TourScheduler::new(max_size, config.max_tours, config.growth_batch),
            stats: RunStats::default(),
            last_atmosphere: 1,
            config,
        })
    }

    /// The configuration this engine was built from.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The walk model state.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The tour scheduler.
    pub fn scheduler(&self) -> &TourScheduler {
        &self.scheduler
    }

    /// The weight estimator and its tables.
    pub fn estimator(&self) -> &WeightEstimator {
        &self.estimator
    }

    /// Run the full tour budget and return the normalised tables.
    ///
    /// Draws from `source` once per ratio test and once per extension.
    ///
    /// # Errors
    ///
    /// [`RunError::NonFiniteWeight`] if a walk's weight overflows, and
    /// [`RunError::CellOutOfRange`] if a walk leaves the histogram (a
    /// model bug; the ceiling normally prevents it).
    pub fn run<S: UniformSource>(mut self, mut source: S) -> Result<RunReport, RunError> {
        let start = Instant::now();
        info!(
            model = %M::KIND,
            max_size = self.config.max_size,
            max_tours = self.config.max_tours,
            growth_batch = self.config.growth_batch,
            "flatPERM run starting"
        );

        self.begin_tour()?;
        while !self.scheduler.is_done() {
            self.step(&mut source)?;
        }

        ResultNormalizer::new(self.config.normalization, self.config.growth_batch)
            .normalize(self.estimator.histogram_mut())?;

        let mut stats = self.stats;
        stats.tours = self.scheduler.tours();
        stats.ceiling = self.scheduler.ceiling();
        stats.elapsed = start.elapsed();
        info!(
            model = %M::KIND,
            tours = stats.tours,
            extensions = stats.extensions,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "flatPERM run finished"
        );

        Ok(RunReport {
            density: self.estimator.into_histogram().into_density()?,
            stats,
        })
    }

    /// One iteration of the growth loop.
    fn step<S: UniformSource>(&mut self, source: &mut S) -> Result<(), RunError> {
        let depth = self.model.depth();
        let primary = self.model.primary();
        if primary >= self.scheduler.limit() || self.last_atmosphere == 0 {
            self.estimator.stop(depth);
        } else {
            let secondary = self.model.secondary();
            let copies =
                self.estimator
                    .decide(depth, primary, secondary, self.scheduler.tours(), source)?;
            self.stats.record_decision(copies);
        }

        if self.estimator.copies(depth) == 0 {
            self.retract();
        }

        if self.model.depth() == 0 && self.estimator.copies(0) == 0 {
            self.scheduler.complete_tour();
            self.begin_tour()
        } else {
            self.extend(source)
        }
    }

    /// Pop until a depth with copies left, or the origin.
    fn retract(&mut self) {
        while self.model.depth() > 0 && self.estimator.copies(self.model.depth()) == 0 {
            self.model.retract();
        }
    }

    /// Grow one step from the tip, if any neighbour is legal.
    fn extend<S: UniformSource>(&mut self, source: &mut S) -> Result<(), RunError> {
        let atmosphere = self.model.atmosphere();
        self.last_atmosphere = atmosphere.len();
        if atmosphere.is_empty() {
            self.stats.dead_ends += 1;
            return Ok(());
        }
        let depth = self.model.depth();
        self.estimator.take_copy(depth);
        let site = atmosphere[source.index(atmosphere.len())];
        self.model.extend(site);
        self.stats.extensions += 1;
        self.estimator.record_extension(
            depth + 1,
            self.model.primary(),
            self.model.secondary(),
            atmosphere.len(),
        )
    }

    /// Reset the walk to the origin and count the origin visit.
    fn begin_tour(&mut self) -> Result<(), RunError> {
        self.model.reset();
        self.last_atmosphere = 1;
        self.estimator.seed_origin()
    }
}

// ── Entry points ───────────────────────────────────────────────────

/// Run the model named by `config.model`, drawing from `source`.
///
/// # Errors
///
/// [`RunError::Config`] for an invalid configuration, otherwise as
/// [`FlatPerm::run`].
pub fn run<S: UniformSource>(config: &RunConfig, source: S) -> Result<RunReport, RunError> {
    match config.model {
        ModelKind::Cactus => FlatPerm::<CactusModel>::new(config.clone())?.run(source),
        ModelKind::Interacting => FlatPerm::<InteractingModel>::new(config.clone())?.run(source),
    }
}

/// [`run`] with the default ChaCha8 stream seeded from `config.seed`.
pub fn run_seeded(config: &RunConfig) -> Result<RunReport, RunError> {
    run(config, RngSource::seeded(config.seed))
}

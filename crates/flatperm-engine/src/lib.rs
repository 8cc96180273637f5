//! flatPERM growth engine.
//!
//! Estimates the density of states of two-dimensional self-avoiding walk
//! ensembles with the flat-histogram Pruned-Enriched Rosenbluth Method.
//! One generic engine, [`FlatPerm`], drives the grow/prune/retract state
//! machine; a [`WalkModel`] supplies the model-specific pieces (which
//! neighbours are legal and how the secondary order parameter changes).
//!
//! Two models ship with the crate:
//!
//! - [`CactusModel`]: histogram over (spine length, spike count)
//! - [`InteractingModel`]: histogram over (length, contact count)
//!
//! # Quick start
//!
//! ```
//! use flatperm_engine::{run_seeded, ModelKind, RunConfig};
//!
//! let mut config = RunConfig::new(ModelKind::Interacting, 6, 200);
//! config.growth_batch = 20;
//! let report = run_seeded(&config).unwrap();
//! assert_eq!(report.density.visit_count(0, 0), Some(200.0));
//! ```
//!
//! The run is single-threaded and synchronous. Independent runs share
//! nothing and can be spread across processes or threads by the caller.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod estimator;
pub mod histogram;
pub mod model;
pub mod normalizer;
pub mod schedule;
pub mod source;
pub mod stats;

pub use config::{ConfigError, Normalization, RunConfig, DEFAULT_GROWTH_BATCH};
pub use engine::{run, run_seeded, FlatPerm, RunReport};
pub use estimator::{WeightEstimator, WeightLedger};
pub use flatperm_core::{ModelKind, RunError, UniformSource};
pub use histogram::{DensityOfStates, Histogram};
pub use model::{CactusModel, InteractingModel, WalkModel};
pub use normalizer::ResultNormalizer;
pub use schedule::TourScheduler;
pub use source::RngSource;
pub use stats::RunStats;

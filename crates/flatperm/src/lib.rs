//! flatperm: flat-histogram PERM for square-lattice walk models.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the flatperm sub-crates. For most users, adding `flatperm` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use flatperm::prelude::*;
//!
//! let mut config = RunConfig::new(ModelKind::Cactus, 8, 500);
//! config.growth_batch = 50;
//! config.seed = 7;
//! let report = run_seeded(&config).unwrap();
//!
//! // Every tour grows exactly one walk of length one, of weight 4.
//! assert_eq!(report.density.weight(1, 0), Some(4.0));
//! assert_eq!(report.stats.tours, 500);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `flatperm-core` | Sites, steps, model kinds, errors, the random-source trait |
//! | [`lattice`] | `flatperm-lattice` | Walk path storage and neighbour filtering |
//! | [`engine`] | `flatperm-engine` | Models, estimator, scheduler, normaliser, the growth loop |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits and errors (`flatperm-core`).
///
/// Contains [`types::Site`], [`types::ModelKind`], the error enums, and the
/// [`types::UniformSource`] trait the engine draws from.
pub use flatperm_core as types;

/// Square-lattice walk storage (`flatperm-lattice`).
///
/// [`lattice::LatticeWalk`] holds the path; [`lattice::atmosphere`]
/// filters a tip's neighbours through a legality predicate.
pub use flatperm_lattice as lattice;

/// The growth engine (`flatperm-engine`).
///
/// [`engine::FlatPerm`] for a statically chosen model, [`engine::run`] and
/// [`engine::run_seeded`] to dispatch on [`types::ModelKind`].
pub use flatperm_engine as engine;

/// Common imports for typical flatperm usage.
///
/// ```rust
/// use flatperm::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use flatperm_core::{ModelKind, Site, UniformSource};

    // Errors
    pub use flatperm_core::{ConfigError, RunError};

    // Engine
    pub use flatperm_engine::{
        run, run_seeded, CactusModel, DensityOfStates, FlatPerm, InteractingModel, Normalization,
        RngSource, RunConfig, RunReport, RunStats, WalkModel,
    };
}

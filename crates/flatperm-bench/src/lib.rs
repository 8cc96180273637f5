//! Benchmark profiles and utilities for the flatperm growth engine.
//!
//! Provides pre-built [`RunConfig`] profiles for benchmarking:
//!
//! - [`reference_profile`]: length 24, 5K tours
//! - [`stress_profile`]: length 64, 20K tours, for profiling deep walks
//! - [`grow_walk`]: a long walk of any model for per-step micro-benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use flatperm_core::{ModelKind, UniformSource};
use flatperm_engine::{Normalization, RunConfig, WalkModel};

/// Build a reference benchmark profile for `model`.
///
/// Ceiling raised every 200 tours, so the full length opens after
/// roughly the first 4.6K tours.
pub fn reference_profile(model: ModelKind, seed: u64) -> RunConfig {
    let mut config = RunConfig::new(model, 24, 5_000);
    config.growth_batch = 200;
    config.seed = seed;
    config
}

/// Build a stress benchmark profile for `model`.
///
/// Same shape as [`reference_profile`] with longer walks and staged
/// normalisation.
pub fn stress_profile(model: ModelKind, seed: u64) -> RunConfig {
    let mut config = RunConfig::new(model, 64, 20_000);
    config.growth_batch = 250;
    config.normalization = Normalization::StagedGrowth;
    config.seed = seed;
    config
}

/// Grow a walk of model `M` by up to `steps` uniformly chosen legal
/// extensions, stopping early if it traps itself.
pub fn grow_walk<M: WalkModel, S: UniformSource>(max_size: usize, steps: usize, source: &mut S) -> M {
    let mut model = M::new(max_size);
    for _ in 0..steps {
        let atmosphere = model.atmosphere();
        if atmosphere.is_empty() || model.primary() >= max_size {
            break;
        }
        let site = atmosphere[source.index(atmosphere.len())];
        model.extend(site);
    }
    model
}

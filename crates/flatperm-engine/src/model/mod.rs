//! Walk models: the model-specific half of the growth loop.
//!
//! The engine's grow/prune/retract skeleton is the same for every model.
//! What differs is which neighbours are legal, how an extension changes
//! the secondary order parameter, and which histogram row the walk is in.
//! [`WalkModel`] captures exactly those pieces; the walk's path lives
//! inside the model next to whatever bookkeeping the model needs to undo
//! its secondary-parameter changes on retraction.

use flatperm_core::{ModelKind, Site};
use flatperm_lattice::{atmosphere, Atmosphere, LatticeWalk};

pub mod cactus;
pub mod interacting;

pub use cactus::CactusModel;
pub use interacting::InteractingModel;

/// The model capability the growth engine is generic over.
///
/// Implementations own their [`LatticeWalk`]. The engine only ever calls
/// [`extend`](WalkModel::extend) with a site taken from
/// [`atmosphere`](WalkModel::atmosphere), and only calls
/// [`retract`](WalkModel::retract) when the walk has at least one step.
pub trait WalkModel {
    /// Identifier used for config matching and logging.
    const KIND: ModelKind;

    /// A fresh origin-only walk sized for primary values up to `max_size`.
    fn new(max_size: usize) -> Self;

    /// Upper bound on raw walk depth for `max_size`.
    ///
    /// Sizes the per-depth weight ledger.
    fn max_depth(max_size: usize) -> usize;

    /// The underlying path.
    fn walk(&self) -> &LatticeWalk;

    /// Return to the origin-only state.
    fn reset(&mut self);

    /// Histogram row of the current walk.
    fn primary(&self) -> usize;

    /// Histogram column of the current walk.
    fn secondary(&self) -> usize;

    /// `true` if `candidate` may be the next site.
    fn is_legal(&self, candidate: Site) -> bool;

    /// Push `site` and apply the secondary-parameter change it causes.
    fn extend(&mut self, site: Site);

    /// Undo the most recent extension's secondary-parameter change and
    /// pop the tail site.
    fn retract(&mut self);

    /// Legal next sites from the current tip.
    fn atmosphere(&self) -> Atmosphere {
        atmosphere(self.walk().tip(), |s| self.is_legal(s))
    }

    /// Current raw depth (number of steps).
    fn depth(&self) -> usize {
        self.walk().depth()
    }
}

//! Interacting self-avoiding walks.
//!
//! Strictly self-avoiding; the secondary parameter counts contacts,
//! pairs of non-consecutive path sites that are lattice neighbours.
//! Contacts are what the model measures, so they never restrict growth.
//!
//! Histogram key: `(length, contacts)`.

use flatperm_core::{ModelKind, Site};
use flatperm_lattice::LatticeWalk;

use super::WalkModel;

/// Interacting-walk state: path plus contacts gained at each depth.
#[derive(Clone, Debug)]
pub struct InteractingModel {
    walk: LatticeWalk,
    /// `gained[d]` = contacts made by the site at depth `d`.
    gained: Vec<usize>,
    contacts: usize,
}

impl InteractingModel {
    /// Total contacts of the current walk.
    pub fn contacts(&self) -> usize {
        self.contacts
    }
}

impl WalkModel for InteractingModel {
    const KIND: ModelKind = ModelKind::Interacting;

    fn new(max_size: usize) -> Self {
        let mut gained = Vec::with_capacity(max_size + 1);
        gained.push(0);
        Self {
            walk: LatticeWalk::with_capacity(max_size),
            gained,
            contacts: 0,
        }
    }

    fn max_depth(max_size: usize) -> usize {
        max_size
    }

    fn walk(&self) -> &LatticeWalk {
        &self.walk
    }

    fn reset(&mut self) {
        self.walk.reset();
        self.gained.clear();
        self.gained.push(0);
        self.contacts = 0;
    }

    fn primary(&self) -> usize {
        self.walk.depth()
    }

    fn secondary(&self) -> usize {
        self.contacts
    }

    fn is_legal(&self, candidate: Site) -> bool {
        !self.walk.occupied_excluding_recent(candidate, 1)
    }

    fn extend(&mut self, site: Site) {
        self.walk.push(site);
        let k = self.walk.tip_contacts();
        self.gained.push(k);
        self.contacts += k;
    }

    fn retract(&mut self) {
        debug_assert!(self.walk.depth() > 0, "retract on origin-only walk");
        if self.gained.len() > 1 {
            if let Some(k) = self.gained.pop() {
                self.contacts -= k;
            }
        }
        self.walk.pop();
    }
}

//! Cactus walks: self-avoiding walks decorated with single-site spikes.
//!
//! A spike is a step out to a fresh site followed immediately by a step
//! back, `A -> B -> A`. The spike does not lengthen the walk's *spine*
//! (its length with spike detours removed) but counts towards the
//! secondary parameter. Once a spike has closed, both of its sites are
//! consumed: no later step may land on either of them, so each spine
//! position carries at most one spike.
//!
//! Histogram key: `(spine, spikes)`.

use flatperm_core::{ModelKind, Site};
use flatperm_lattice::LatticeWalk;

use super::WalkModel;

/// Cactus-walk state: path, spine length and the spike stack.
#[derive(Clone, Debug)]
pub struct CactusModel {
    walk: LatticeWalk,
    spine: usize,
    /// Sites consumed by closed spikes, two per spike, in closing order.
    spike_sites: Vec<Site>,
    /// Number of spikes closed at each spine position.
    spikes_at: Vec<u32>,
}

impl CactusModel {
    /// Spine length: raw depth minus two per closed spike.
    pub fn spine(&self) -> usize {
        self.spine
    }

    /// Number of closed spikes.
    pub fn spikes(&self) -> usize {
        self.spike_sites.len() / 2
    }

    /// Sites consumed by closed spikes.
    pub fn spike_sites(&self) -> &[Site] {
        &self.spike_sites
    }

    fn spikes_at_mut(&mut self, spine: usize) -> &mut u32 {
        if spine >= self.spikes_at.len() {
            self.spikes_at.resize(spine + 1, 0);
        }
        &mut self.spikes_at[spine]
    }
}

impl WalkModel for CactusModel {
    const KIND: ModelKind = ModelKind::Cactus;

    fn new(max_size: usize) -> Self {
        Self {
            walk: LatticeWalk::with_capacity(Self::max_depth(max_size)),
            spine: 0,
            spike_sites: Vec::new(),
            spikes_at: vec![0; max_size + 1],
        }
    }

    /// Every spine position below the ceiling can carry one spike of two
    /// raw steps on top of the spine itself.
    fn max_depth(max_size: usize) -> usize {
        3 * max_size + 2
    }

    fn walk(&self) -> &LatticeWalk {
        &self.walk
    }

    fn reset(&mut self) {
        self.walk.reset();
        self.spine = 0;
        self.spike_sites.clear();
        self.spikes_at.fill(0);
    }

    fn primary(&self) -> usize {
        self.spine
    }

    fn secondary(&self) -> usize {
        self.spikes()
    }

    fn is_legal(&self, candidate: Site) -> bool {
        // With fewer than three sites every neighbour is open, including
        // the origin: stepping back onto it closes the first spike.
        if self.walk.len() < 3 {
            return true;
        }
        !self.walk.occupied_excluding_recent(candidate, 2) && !self.spike_sites.contains(&candidate)
    }

    fn extend(&mut self, site: Site) {
        self.walk.push(site);
        self.spine += 1;
        let (Some(outer), Some(base)) = (self.walk.back_from_tip(1), self.walk.back_from_tip(2))
        else {
            return;
        };
        if base == site {
            // A -> B -> A: consume A and B, and fold the spike off the spine.
            self.spike_sites.push(site);
            self.spike_sites.push(outer);
            self.spine -= 2;
            let spine = self.spine;
            *self.spikes_at_mut(spine) += 1;
        }
    }

    fn retract(&mut self) {
        debug_assert!(self.walk.depth() > 0, "retract on origin-only walk");
        let spine = self.spine;
        if let Some(count) = self.spikes_at.get_mut(spine) {
            if *count > 0 {
                // Reopen the spike that closed at this spine position.
                *count -= 1;
                self.spine += 2;
                let keep = self.spike_sites.len().saturating_sub(2);
                self.spike_sites.truncate(keep);
            }
        }
        self.walk.pop();
        self.spine -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatperm_core::{ORIGIN, STEPS};
    use proptest::prelude::*;

    fn s(x: i32, y: i32) -> Site {
        Site::new(x, y)
    }

    #[test]
    fn short_walk_admits_every_neighbour() {
        let mut m = CactusModel::new(4);
        assert_eq!(m.atmosphere().len(), 4);
        m.extend(s(1, 0));
        // The origin is open: returning to it closes a spike.
        assert_eq!(m.atmosphere().len(), 4);
    }

    #[test]
    fn spike_on_origin_folds_spine() {
        let mut m = CactusModel::new(4);
        m.extend(s(1, 0));
        m.extend(ORIGIN);
        assert_eq!(m.depth(), 2);
        assert_eq!(m.spine(), 0);
        assert_eq!(m.spikes(), 1);
        assert_eq!(m.spike_sites(), &[ORIGIN, s(1, 0)]);
    }

    #[test]
    fn consumed_spike_sites_are_illegal() {
        let mut m = CactusModel::new(4);
        m.extend(s(1, 0));
        m.extend(ORIGIN);
        // (1,0) is the spike tip; without the spike list it would look
        // like the site just behind the tip and be admitted.
        assert!(!m.is_legal(s(1, 0)));
        let atm = m.atmosphere();
        assert_eq!(atm.as_slice(), &[s(0, 1), s(-1, 0), s(0, -1)]);
    }

    #[test]
    fn spine_sites_are_illegal_except_the_one_behind_the_tip() {
        let mut m = CactusModel::new(6);
        m.extend(s(1, 0));
        m.extend(s(1, 1));
        m.extend(s(0, 1));
        assert!(!m.is_legal(ORIGIN));
        assert!(!m.is_legal(s(1, 0)));
        // (1,1) is directly behind the tip: a spike may close there.
        assert!(m.is_legal(s(1, 1)));
    }

    #[test]
    fn retract_reopens_spike() {
        let mut m = CactusModel::new(4);
        m.extend(s(1, 0));
        m.extend(s(2, 0));
        m.extend(s(1, 0));
        assert_eq!((m.spine(), m.spikes()), (1, 1));
        m.retract();
        assert_eq!((m.spine(), m.spikes()), (2, 0));
        assert_eq!(m.walk().tip(), s(2, 0));
        assert!(m.spike_sites().is_empty());
        m.retract();
        m.retract();
        assert_eq!((m.depth(), m.spine(), m.spikes()), (0, 0, 0));
    }

    #[test]
    fn spike_then_continue_then_retract() {
        let mut m = CactusModel::new(6);
        m.extend(s(1, 0));
        m.extend(s(1, 1));
        m.extend(s(1, 0)); // spike at spine 1
        m.extend(s(2, 0));
        assert_eq!((m.depth(), m.spine(), m.spikes()), (4, 2, 1));
        m.retract();
        assert_eq!((m.depth(), m.spine(), m.spikes()), (3, 1, 1));
        m.retract();
        assert_eq!((m.depth(), m.spine(), m.spikes()), (2, 2, 0));
    }

    #[test]
    fn spike_records_stay_in_step() {
        let mut m = CactusModel::new(6);
        // One spike at spine 0, a step, then one at spine 1.
        for site in [s(1, 0), ORIGIN, s(0, 1), s(-1, 1), s(0, 1)] {
            m.extend(site);
        }
        assert_eq!((m.depth(), m.spine(), m.spikes()), (5, 1, 2));
        assert_eq!(m.spike_sites(), &[ORIGIN, s(1, 0), s(0, 1), s(-1, 1)]);
        assert_eq!(m.spikes_at[..2], [1, 1]);
        let recorded: u32 = m.spikes_at.iter().sum();
        assert_eq!(recorded as usize, m.spikes());
    }

    #[test]
    fn reset_clears_spikes() {
        let mut m = CactusModel::new(4);
        m.extend(s(0, 1));
        m.extend(ORIGIN);
        m.reset();
        assert_eq!((m.depth(), m.spine(), m.spikes()), (0, 0, 0));
        assert_eq!(m.atmosphere().len(), 4);
    }

    /// Snapshot of everything a retraction must restore.
    fn state(m: &CactusModel) -> (Vec<Site>, usize, Vec<Site>) {
        (m.walk().path().to_vec(), m.spine(), m.spike_sites().to_vec())
    }

    proptest! {
        #[test]
        fn random_growth_respects_invariants_and_unwinds(
            picks in proptest::collection::vec(0usize..4, 1..60),
        ) {
            let mut m = CactusModel::new(64);
            let mut history = vec![state(&m)];
            for p in picks {
                let atm = m.atmosphere();
                if atm.is_empty() {
                    break;
                }
                m.extend(atm[p % atm.len()]);
                history.push(state(&m));

                // At most one spike per spine position.
                prop_assert!(m.spikes() <= m.spine() + 1);
                // Two raw steps per spike on top of the spine.
                prop_assert_eq!(m.depth(), m.spine() + 2 * m.spikes());
                prop_assert!(m.spikes() <= m.depth() / 2);
                // Both spike records describe the same spikes.
                let recorded: u32 = m.spikes_at.iter().sum();
                prop_assert_eq!(recorded as usize, m.spikes());
                prop_assert_eq!(m.spike_sites().len(), 2 * m.spikes());
                // Consecutive sites stay unit steps apart.
                for w in m.walk().path().windows(2) {
                    prop_assert!(STEPS.iter().any(|&st| w[0].offset(st) == w[1]));
                }
            }
            history.pop();
            while let Some(expected) = history.pop() {
                m.retract();
                prop_assert_eq!(state(&m), expected);
            }
            prop_assert_eq!(m.depth(), 0);
        }
    }
}

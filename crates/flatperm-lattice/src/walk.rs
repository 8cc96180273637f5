//! The in-flight walk: an owned path used as a stack.

use flatperm_core::{Site, ORIGIN};

/// A walk on the square lattice rooted at the origin.
///
/// `path[0]` is always [`ORIGIN`] and consecutive entries differ by one
/// unit step. The engine never copies a walk wholesale; it mutates the
/// tail in place with [`push`](LatticeWalk::push) and
/// [`pop`](LatticeWalk::pop) and resets it at the start of every tour.
///
/// Self-avoidance is not enforced here. Which revisits are allowed is a
/// property of the walk model (a cactus spike legitimately returns to the
/// site two steps back), so the model decides legality through the
/// occupancy queries below.
#[derive(Clone, Debug)]
pub struct LatticeWalk {
    path: Vec<Site>,
}

impl LatticeWalk {
    /// A walk holding only the origin.
    pub fn new() -> Self {
        Self { path: vec![ORIGIN] }
    }

    /// A walk with room for `steps` extensions before reallocating.
    pub fn with_capacity(steps: usize) -> Self {
        let mut path = Vec::with_capacity(steps + 1);
        path.push(ORIGIN);
        Self { path }
    }

    /// Truncate back to the origin-only state.
    pub fn reset(&mut self) {
        self.path.clear();
        self.path.push(ORIGIN);
    }

    /// Number of sites in the path, including the origin.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Always returns `false`: the origin is never popped.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of steps taken (`len() - 1`).
    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }

    /// The current tip of the walk.
    pub fn tip(&self) -> Site {
        // The origin is never popped, so the path is never empty.
        self.path[self.path.len() - 1]
    }

    /// The site `back` positions behind the tip, if the path is long enough.
    ///
    /// `back_from_tip(0)` is the tip itself.
    pub fn back_from_tip(&self, back: usize) -> Option<Site> {
        let len = self.path.len();
        if back < len {
            Some(self.path[len - 1 - back])
        } else {
            None
        }
    }

    /// The full path, origin first.
    pub fn path(&self) -> &[Site] {
        &self.path
    }

    /// Append `site` at the tail.
    pub fn push(&mut self, site: Site) {
        debug_assert!(
            self.tip().is_adjacent(site),
            "walk step from {} to {} is not a unit step",
            self.tip(),
            site
        );
        self.path.push(site);
    }

    /// Remove the tail site. Returns `None` once only the origin remains.
    pub fn pop(&mut self) -> Option<Site> {
        if self.path.len() > 1 {
            self.path.pop()
        } else {
            None
        }
    }

    /// `true` if `site` occurs anywhere in the path except the last
    /// `exclude_last` entries.
    ///
    /// Excluding the last entry alone gives plain self-avoidance (the tip
    /// is never its own neighbour). Excluding the last two also admits the
    /// site just behind the tip, which is how a cactus spike closes.
    pub fn occupied_excluding_recent(&self, site: Site, exclude_last: usize) -> bool {
        let end = self.path.len().saturating_sub(exclude_last);
        self.path[..end].contains(&site)
    }

    /// Number of non-consecutive lattice contacts made by the tip.
    ///
    /// Counts path entries at index `<= len - 3` adjacent to the tip; the
    /// predecessor at `len - 2` is adjacent trivially and is skipped.
    pub fn tip_contacts(&self) -> usize {
        let len = self.path.len();
        if len < 3 {
            return 0;
        }
        let tip = self.path[len - 1];
        self.path[..len - 2]
            .iter()
            .filter(|s| s.is_adjacent(tip))
            .count()
    }
}

impl Default for LatticeWalk {
    fn default() -> Self {
        Self::new()
    }
}

//! Atmosphere enumeration: the legal next sites from a walk's tip.

use flatperm_core::Site;
use smallvec::SmallVec;

/// The legal next sites of a walk, in [`STEPS`](flatperm_core::STEPS) order.
///
/// A square-lattice tip has at most four neighbours, so the set never
/// spills to the heap.
pub type Atmosphere = SmallVec<[Site; 4]>;

/// Enumerate the neighbours of `tip` accepted by `legal`.
///
/// Candidates are visited in the fixed step order (east, north, west,
/// south), so for a deterministic `legal` the result is deterministic and
/// an index draw into it is reproducible from the random stream alone.
///
/// # Examples
///
/// ```
/// use flatperm_core::{Site, ORIGIN};
/// use flatperm_lattice::atmosphere;
///
/// let blocked = Site::new(1, 0);
/// let atm = atmosphere(ORIGIN, |s| s != blocked);
/// assert_eq!(atm.len(), 3);
/// assert_eq!(atm[0], Site::new(0, 1));
/// ```
pub fn atmosphere<F>(tip: Site, mut legal: F) -> Atmosphere
where
    F: FnMut(Site) -> bool,
{
    tip.neighbours().into_iter().filter(|&s| legal(s)).collect()
}

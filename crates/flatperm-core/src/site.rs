//! Square-lattice sites and unit steps.

use std::fmt;

/// An integer coordinate on the square lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Site {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

/// The lattice origin. Every walk starts here.
pub const ORIGIN: Site = Site { x: 0, y: 0 };

impl Site {
    /// Create a site at `(x, y)`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The site reached by taking `step` from `self`.
    pub const fn offset(self, step: Step) -> Self {
        Self {
            x: self.x + step.dx,
            y: self.y + step.dy,
        }
    }

    /// The four lattice neighbours of `self`, in [`STEPS`] order.
    pub fn neighbours(self) -> [Site; 4] {
        STEPS.map(|step| self.offset(step))
    }

    /// `true` if `other` is exactly one unit step away.
    pub fn is_adjacent(self, other: Site) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Site {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// A unit displacement on the square lattice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    /// Horizontal displacement.
    pub dx: i32,
    /// Vertical displacement.
    pub dy: i32,
}

/// The four unit steps in enumeration order: east, north, west, south.
///
/// Neighbour enumeration always walks this array front to back, so the
/// order of a walk's atmosphere is deterministic.
pub const STEPS: [Step; 4] = [
    Step { dx: 1, dy: 0 },
    Step { dx: 0, dy: 1 },
    Step { dx: -1, dy: 0 },
    Step { dx: 0, dy: -1 },
];

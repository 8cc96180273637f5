//! Walk-model identifiers.

use std::fmt;

/// Which walk model a run samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// Cactus walk: histogram over (spine length, spike count).
    Cactus,
    /// Interacting walk: histogram over (length, contact count).
    Interacting,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cactus => write!(f, "cactus"),
            Self::Interacting => write!(f, "interacting"),
        }
    }
}

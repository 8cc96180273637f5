//! Lattice walk storage and neighbour enumeration.
//!
//! [`LatticeWalk`] is the growing path, used as a stack: the engine
//! pushes a site on every extension and pops one on every retraction.
//! [`atmosphere`] enumerates the legal next sites from the walk's tip
//! under a caller-supplied exclusion rule.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod neighbours;
pub mod walk;

pub use neighbours::{atmosphere, Atmosphere};
pub use walk::LatticeWalk;

//! Core types and traits for flatPERM sampling.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the workspace: lattice
//! sites and steps, error types, and the uniform random-source trait
//! consumed by the growth engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod kind;
pub mod site;
pub mod traits;

pub use error::{ConfigError, RunError};
pub use kind::ModelKind;
pub use site::{Site, Step, ORIGIN, STEPS};
pub use traits::UniformSource;

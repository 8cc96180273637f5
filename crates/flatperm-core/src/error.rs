//! Error types for flatPERM runs.
//!
//! Nothing in the growth loop's normal control flow is an error: dead
//! ends, retraction and tour completion are ordinary states. These enums
//! cover the configuration preconditions checked before a run starts and
//! the numeric and lifecycle failures detected while it executes.

use std::error::Error;
use std::fmt;

use crate::kind::ModelKind;

/// Errors detected while validating a run configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_tours` is zero; at least one tour must run.
    ZeroTours,
    /// `growth_batch` is zero; the ceiling would never be raised.
    ZeroGrowthBatch,
    /// The two `(max_size + 1)^2` histogram tables exceed the largest
    /// possible allocation, or could not be allocated.
    TableTooLarge {
        /// The configured maximum primary parameter.
        max_size: u32,
    },
    /// The configuration names a different model than the engine was
    /// instantiated for.
    ModelMismatch {
        /// Model named by the configuration.
        configured: ModelKind,
        /// Model the engine samples.
        engine: ModelKind,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTours => write!(f, "max_tours must be at least 1"),
            Self::ZeroGrowthBatch => write!(f, "growth_batch must be at least 1"),
            Self::TableTooLarge { max_size } => {
                write!(f, "histogram for max_size {max_size} is too large to allocate")
            }
            Self::ModelMismatch { configured, engine } => {
                write!(f, "config names the {configured} model but the engine samples {engine}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Errors from executing or post-processing a run.
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// The weight ratio for a cell was NaN or infinite.
    ///
    /// Rosenbluth weights are products of atmospheres and overflow `f64`
    /// on very long walks; the run is aborted rather than silently
    /// corrupting the estimator.
    NonFiniteWeight {
        /// Primary parameter of the offending cell.
        primary: usize,
        /// Secondary parameter of the offending cell.
        secondary: usize,
        /// The ratio that failed the check.
        ratio: f64,
    },
    /// A walk reached a cell outside the histogram.
    CellOutOfRange {
        /// Primary parameter of the offending cell.
        primary: usize,
        /// Secondary parameter of the offending cell.
        secondary: usize,
        /// Row width of the histogram.
        width: usize,
    },
    /// The weight table was already normalised; division is destructive
    /// and may only happen once.
    AlreadyNormalized,
    /// Normalisation was requested before any tour completed.
    NoCompletedTours,
    /// Raw weight sums were frozen into a result without being
    /// normalised first.
    NotNormalized,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::NonFiniteWeight {
                primary,
                secondary,
                ratio,
            } => write!(
                f,
                "non-finite weight ratio {ratio} at cell ({primary}, {secondary})"
            ),
            Self::CellOutOfRange {
                primary,
                secondary,
                width,
            } => write!(
                f,
                "cell ({primary}, {secondary}) outside {width}x{width} histogram"
            ),
            Self::AlreadyNormalized => write!(f, "weight table already normalised"),
            Self::NoCompletedTours => write!(f, "no completed tours to normalise"),
            Self::NotNormalized => write!(f, "weight table has not been normalised"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

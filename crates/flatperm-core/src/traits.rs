//! The random-source abstraction consumed by the growth engine.

/// A linear stream of uniform draws in `[0, 1)`.
///
/// The engine draws exactly once per decision point: one draw for each
/// stochastic-rounding test and one [`index`](UniformSource::index) draw
/// for each extension. Implementations must not be shared between
/// concurrent runs without independent state.
pub trait UniformSource {
    /// Next uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform index in `[0, bound)`. `bound` must be non-zero.
    ///
    /// The default implementation scales one [`uniform`](UniformSource::uniform)
    /// draw and clamps the result, so a source that returns values
    /// arbitrarily close to 1.0 still stays in range.
    fn index(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "index bound must be non-zero");
        let i = (self.uniform() * bound as f64) as usize;
        i.min(bound.saturating_sub(1))
    }
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    fn index(&mut self, bound: usize) -> usize {
        (**self).index(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl UniformSource for Fixed {
        fn uniform(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn index_scales_uniform_draw() {
        assert_eq!(Fixed(0.0).index(4), 0);
        assert_eq!(Fixed(0.26).index(4), 1);
        assert_eq!(Fixed(0.74).index(4), 2);
    }

    #[test]
    fn index_clamps_to_last_slot() {
        // 1.0 is outside the contract but must not index out of range.
        assert_eq!(Fixed(1.0).index(3), 2);
    }

    #[test]
    fn mutable_reference_forwards() {
        fn draw<S: UniformSource>(mut s: S) -> usize {
            s.index(2)
        }
        let mut src = Fixed(0.5);
        assert_eq!(draw(&mut src), 1);
    }
}

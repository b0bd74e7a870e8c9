//! Core traits for selinf
//!
//! The batch evaluator is written against `RandomizationDensity`, not against a
//! concrete noise law, so Gaussian and Laplace randomizations share one code path.

/// Log-density of a randomization vector.
///
/// Implementors validate their parameters at construction time, so evaluation
/// itself cannot fail. Evaluation must be a pure function of `omega`.
pub trait RandomizationDensity: Send + Sync {
    /// Log-density at `omega`. The dimension is `omega.len()`.
    fn log_density(&self, omega: &[f64]) -> f64;

    /// Short name used in log messages (e.g. "gaussian").
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flat;

    impl RandomizationDensity for Flat {
        fn log_density(&self, _omega: &[f64]) -> f64 {
            0.0
        }

        fn name(&self) -> &str {
            "flat"
        }
    }

    #[test]
    fn test_trait_object() {
        let d: Box<dyn RandomizationDensity> = Box::new(Flat);
        assert_eq!(d.name(), "flat");
        assert_eq!(d.log_density(&[1.0, 2.0]), 0.0);
    }
}

//! Laplace distribution utilities.

use crate::math::sum_abs;
use si_core::{Error, RandomizationDensity, Result};

/// Log-PDF of a Laplace distribution with location `mu` and scale `b` at `x`.
///
/// `log p(x) = -ln(2b) - |x-mu| / b`
pub fn logpdf(x: f64, mu: f64, b: f64) -> Result<f64> {
    let d = IsotropicLaplace::new(b)?;
    Ok(d.log_norm - (x - mu).abs() * d.inv_scale)
}

/// Log-PDF of `n` independent mean-zero Laplace(b) coordinates at `omega`.
///
/// `log p(ω) = -n ln(2b) - ||ω||₁ / b`
pub fn isotropic_logpdf(omega: &[f64], b: f64) -> Result<f64> {
    Ok(IsotropicLaplace::new(b)?.log_density(omega))
}

/// Product of independent mean-zero Laplace laws with common scale `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsotropicLaplace {
    scale: f64,
    log_norm: f64,
    inv_scale: f64,
}

impl IsotropicLaplace {
    /// Create from a scale; fails unless `b` is finite and > 0.
    pub fn new(b: f64) -> Result<Self> {
        if !b.is_finite() || b <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "Laplace scale must be finite and > 0, got {b}"
            )));
        }
        Ok(Self { scale: b, log_norm: -(2.0 * b).ln(), inv_scale: 1.0 / b })
    }

    /// Scale `b`.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl RandomizationDensity for IsotropicLaplace {
    #[inline]
    fn log_density(&self, omega: &[f64]) -> f64 {
        omega.len() as f64 * self.log_norm - sum_abs(omega) * self.inv_scale
    }

    fn name(&self) -> &str {
        "laplace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use statrs::distribution::{Continuous, Laplace};

    #[test]
    fn test_at_location() {
        assert_relative_eq!(logpdf(1.0, 1.0, 0.5).unwrap(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_matches_statrs() {
        let d = Laplace::new(0.4, 1.3).unwrap();
        for x in [-3.0, -0.1, 0.4, 2.5] {
            assert_relative_eq!(logpdf(x, 0.4, 1.3).unwrap(), d.ln_pdf(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_isotropic_is_sum() {
        let omega = [0.5, -1.5, 2.0];
        let b = 0.8;
        let sum: f64 = omega.iter().map(|&w| logpdf(w, 0.0, b).unwrap()).sum();
        assert_relative_eq!(isotropic_logpdf(&omega, b).unwrap(), sum, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_scale() {
        assert!(matches!(IsotropicLaplace::new(0.0), Err(Error::InvalidParameter(_))));
        assert!(isotropic_logpdf(&[1.0], -1.0).is_err());
        assert!(logpdf(0.0, 0.0, f64::INFINITY).is_err());
    }
}

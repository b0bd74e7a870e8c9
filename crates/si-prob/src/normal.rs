//! Normal distribution utilities.

use crate::math::{LN_SQRT_2PI, sum_squares_scaled};
use si_core::{Error, NoiseScale, RandomizationDensity, Result};

/// Log-PDF of a Normal distribution `N(mu, sigma)` at `x`.
///
/// `log p(x) = -0.5 * ((x-mu)/sigma)^2 - ln(sigma) - ln(sqrt(2π))`
pub fn logpdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(Error::InvalidParameter(format!("sigma must be finite and > 0, got {sigma}")));
    }
    let z = (x - mu) / sigma;
    Ok(-0.5 * z * z - sigma.ln() - LN_SQRT_2PI)
}

/// Log-PDF of the isotropic Gaussian `N(0, sigma² I)` at `omega`.
///
/// `log p(ω) = -n ln(sigma) - (n/2) ln(2π) - ||ω||² / (2 sigma²)` with `n = omega.len()`.
pub fn isotropic_logpdf(omega: &[f64], sigma: f64) -> Result<f64> {
    Ok(IsotropicGaussian::new(sigma)?.log_density(omega))
}

/// Mean-zero Gaussian with covariance `sigma² I`.
///
/// The per-coordinate normalization `-ln(sigma) - ln(sqrt(2π))` is computed
/// once. The quadratic term is `0.5 * Σ (ω_i / sigma)²`; `sigma²` is never
/// formed, so tiny (even subnormal) scales do not underflow to a NaN result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsotropicGaussian {
    sigma: f64,
    log_norm: f64,
}

impl IsotropicGaussian {
    /// Create from a raw scale; fails unless `sigma` is finite and > 0.
    pub fn new(sigma: f64) -> Result<Self> {
        Ok(Self::from_scale(NoiseScale::new(sigma)?))
    }

    /// Create from an already validated scale.
    pub fn from_scale(scale: NoiseScale) -> Self {
        let sigma = scale.get();
        Self { sigma, log_norm: -sigma.ln() - LN_SQRT_2PI }
    }

    /// Standard deviation per coordinate.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl RandomizationDensity for IsotropicGaussian {
    #[inline]
    fn log_density(&self, omega: &[f64]) -> f64 {
        omega.len() as f64 * self.log_norm - 0.5 * sum_squares_scaled(omega, self.sigma)
    }

    fn name(&self) -> &str {
        "gaussian"
    }
}

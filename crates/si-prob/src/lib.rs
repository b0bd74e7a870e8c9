//! Probability building blocks for selinf.
//!
//! This crate hosts the log-density kernels used to evaluate randomization noise:
//! - scalar and isotropic Gaussian log-densities
//! - isotropic Laplace log-densities
//! - small numeric helpers (norms, constants)

pub mod laplace;
pub mod math;
pub mod normal;

pub use laplace::IsotropicLaplace;
pub use normal::IsotropicGaussian;

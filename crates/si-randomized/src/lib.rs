//! # si-randomized
//!
//! Log-density of the randomization vector of a randomized selection procedure,
//! evaluated for many sample points at once.
//!
//! For sample point `i` the randomization is reconstructed as
//! `ω_i = A_D d_i + A_O o_i + h`, where `d_i` / `o_i` are column `i` of the
//! internal and optimization state matrices, and then scored under the
//! randomization density (isotropic Gaussian by default).
//!
//! ## Architecture
//!
//! - [`affine`]: per-point affine reconstruction into a reusable buffer.
//! - [`batch`]: shape validation gate plus the (optionally Rayon-parallel)
//!   per-point loop, generic over `si_core::RandomizationDensity`.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Affine reconstruction `ω = A_D d + A_O o + h`.
pub mod affine;
/// Shape validation and batched evaluation over sample points.
pub mod batch;

pub use affine::AffineReconstructor;
pub use batch::{
    BatchEvaluator, Dimensions, EvaluatorConfig, log_density_gaussian, log_density_laplace,
    validate_shapes,
};

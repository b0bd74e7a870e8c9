//! # si-core
//!
//! Core types, traits, and error handling for selinf.
//!
//! This crate provides:
//! - Common error types
//! - Dense matrix/vector newtypes for the affine randomization model
//! - The `RandomizationDensity` trait shared by density kernels and the batch evaluator

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{Error, Result};
pub use traits::RandomizationDensity;
pub use types::{LinearMap, NoiseScale, Offset, StateMatrix};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

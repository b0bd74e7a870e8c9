use crate::affine::AffineReconstructor;
use nalgebra::DVector;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use si_core::{Error, LinearMap, Offset, RandomizationDensity, Result, StateMatrix};
use si_prob::{IsotropicGaussian, IsotropicLaplace};

/// Dimensions of a validated batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Randomization space dimension.
    pub ndim: usize,
    /// Internal (data) state dimension.
    pub ninternal: usize,
    /// Optimization state dimension.
    pub noptimization: usize,
    /// Number of sample points.
    pub npt: usize,
}

/// Check that all shapes of a batch agree.
///
/// Checks run in this order: sample counts, randomization dimension of the two
/// maps, internal map vs internal state, optimization map vs optimization
/// state, offset length. The first failure is returned.
pub fn validate_shapes(
    internal_linear: &LinearMap,
    internal_state: &StateMatrix,
    optimization_linear: &LinearMap,
    optimization_state: &StateMatrix,
    offset: &Offset,
) -> Result<Dimensions> {
    let npt = internal_state.n_points();
    if optimization_state.n_points() != npt {
        return Err(Error::ShapeMismatch(format!(
            "sample count mismatch: internal state has {npt} columns, optimization state has {}",
            optimization_state.n_points()
        )));
    }

    let ndim = optimization_linear.range_dim();
    if internal_linear.range_dim() != ndim {
        return Err(Error::ShapeMismatch(format!(
            "randomization dimension mismatch: internal linear map has {} rows, optimization linear map has {ndim}",
            internal_linear.range_dim()
        )));
    }

    let ninternal = internal_linear.domain_dim();
    if internal_state.dim() != ninternal {
        return Err(Error::ShapeMismatch(format!(
            "internal dimension mismatch: internal linear map has {ninternal} columns, internal state has {} rows",
            internal_state.dim()
        )));
    }

    let noptimization = optimization_linear.domain_dim();
    if optimization_state.dim() != noptimization {
        return Err(Error::ShapeMismatch(format!(
            "optimization dimension mismatch: optimization linear map has {noptimization} columns, optimization state has {} rows",
            optimization_state.dim()
        )));
    }

    if offset.len() != ndim {
        return Err(Error::ShapeMismatch(format!(
            "offset length {} does not match randomization dimension {ndim}",
            offset.len()
        )));
    }

    Ok(Dimensions { ndim, ninternal, noptimization, npt })
}

/// Configuration for [`BatchEvaluator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Batches with at least this many sample points run on the Rayon pool.
    pub parallel_threshold: usize,
    /// Sample points per parallel task (0 is treated as 1).
    pub chunk_size: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self { parallel_threshold: 4096, chunk_size: 256 }
    }
}

impl EvaluatorConfig {
    /// Decode from JSON; missing fields take their default.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Evaluates a randomization log-density at every sample point of a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchEvaluator {
    config: EvaluatorConfig,
}

impl BatchEvaluator {
    /// Create an evaluator with the given configuration.
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Log-density of the reconstructed randomization at each sample point.
    ///
    /// Entry `i` of the result corresponds to column `i` of the state matrices.
    /// Shapes are validated before any arithmetic; on failure nothing is computed.
    pub fn evaluate<D: RandomizationDensity + ?Sized>(
        &self,
        density: &D,
        internal_linear: &LinearMap,
        internal_state: &StateMatrix,
        optimization_linear: &LinearMap,
        optimization_state: &StateMatrix,
        offset: &Offset,
    ) -> Result<Vec<f64>> {
        let dims = validate_shapes(
            internal_linear,
            internal_state,
            optimization_linear,
            optimization_state,
            offset,
        )?;
        let recon =
            AffineReconstructor::from_validated(internal_linear, optimization_linear, offset);
        Ok(self.evaluate_validated(density, dims, &recon, internal_state, optimization_state))
    }

    fn evaluate_validated<D: RandomizationDensity + ?Sized>(
        &self,
        density: &D,
        dims: Dimensions,
        recon: &AffineReconstructor<'_>,
        internal_state: &StateMatrix,
        optimization_state: &StateMatrix,
    ) -> Vec<f64> {
        let parallel = dims.npt >= self.config.parallel_threshold;
        log::debug!(
            "{} log-density batch: npt={}, ndim={}, ninternal={}, noptimization={}, parallel={}",
            density.name(),
            dims.npt,
            dims.ndim,
            dims.ninternal,
            dims.noptimization,
            parallel
        );

        // Each call owns its scratch buffer, so chunks share nothing mutable.
        let fill = |start: usize, slots: &mut [f64]| {
            let mut omega = DVector::<f64>::zeros(dims.ndim);
            for (k, slot) in slots.iter_mut().enumerate() {
                let j = start + k;
                recon.reconstruct_into(
                    &internal_state.column(j),
                    &optimization_state.column(j),
                    &mut omega,
                );
                *slot = density.log_density(omega.as_slice());
            }
        };

        let mut out = vec![0.0; dims.npt];
        if parallel {
            let chunk = self.config.chunk_size.max(1);
            out.par_chunks_mut(chunk)
                .enumerate()
                .for_each(|(c, slots)| fill(c * chunk, slots));
        } else {
            fill(0, &mut out);
        }
        out
    }
}

/// Isotropic Gaussian log-density of the reconstructed randomization at every
/// sample point, with the default [`EvaluatorConfig`].
///
/// Shape checks run before the noise scale check, so a batch with both a bad
/// shape and a bad scale reports the shape.
pub fn log_density_gaussian(
    noise_scale: f64,
    internal_linear: &LinearMap,
    internal_state: &StateMatrix,
    optimization_linear: &LinearMap,
    optimization_state: &StateMatrix,
    offset: &Offset,
) -> Result<Vec<f64>> {
    evaluate_default(
        || IsotropicGaussian::new(noise_scale),
        internal_linear,
        internal_state,
        optimization_linear,
        optimization_state,
        offset,
    )
}

/// Isotropic Laplace counterpart of [`log_density_gaussian`]; `scale` is the
/// Laplace scale `b` of each coordinate.
pub fn log_density_laplace(
    scale: f64,
    internal_linear: &LinearMap,
    internal_state: &StateMatrix,
    optimization_linear: &LinearMap,
    optimization_state: &StateMatrix,
    offset: &Offset,
) -> Result<Vec<f64>> {
    evaluate_default(
        || IsotropicLaplace::new(scale),
        internal_linear,
        internal_state,
        optimization_linear,
        optimization_state,
        offset,
    )
}

/// Validate shapes, then build the density, then evaluate with the default config.
fn evaluate_default<D: RandomizationDensity>(
    make_density: impl FnOnce() -> Result<D>,
    internal_linear: &LinearMap,
    internal_state: &StateMatrix,
    optimization_linear: &LinearMap,
    optimization_state: &StateMatrix,
    offset: &Offset,
) -> Result<Vec<f64>> {
    let dims = validate_shapes(
        internal_linear,
        internal_state,
        optimization_linear,
        optimization_state,
        offset,
    )?;
    let density = make_density()?;
    let recon = AffineReconstructor::from_validated(internal_linear, optimization_linear, offset);
    Ok(BatchEvaluator::default().evaluate_validated(
        &density,
        dims,
        &recon,
        internal_state,
        optimization_state,
    ))
}

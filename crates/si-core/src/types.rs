//! Dense data types for the affine randomization model
//!
//! All matrices are stored column-major (`nalgebra::DMatrix`), so a state
//! matrix's column `j` is the state vector of sample point `j` and is
//! contiguous in memory.

use crate::{Error, Result};
use nalgebra::{DMatrix, DVector, DVectorView};
use serde::{Deserialize, Serialize};

fn check_len(what: &str, nrows: usize, ncols: usize, len: usize) -> Result<()> {
    let expected = nrows.checked_mul(ncols).ok_or_else(|| {
        Error::ShapeMismatch(format!("{what}: {nrows}x{ncols} overflows usize"))
    })?;
    if expected != len {
        return Err(Error::ShapeMismatch(format!(
            "{what}: expected {expected} column-major values for a {nrows}x{ncols} matrix, got {len}"
        )));
    }
    Ok(())
}

/// Linear operator from a `k`-dimensional state space into the
/// `ndim`-dimensional randomization space (`ndim x k`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearMap {
    matrix: DMatrix<f64>,
}

impl LinearMap {
    /// Wrap an existing matrix.
    pub fn new(matrix: DMatrix<f64>) -> Self {
        Self { matrix }
    }

    /// Build from column-major data.
    pub fn from_column_slice(nrows: usize, ncols: usize, data: &[f64]) -> Result<Self> {
        check_len("LinearMap", nrows, ncols, data.len())?;
        Ok(Self { matrix: DMatrix::from_column_slice(nrows, ncols, data) })
    }

    /// Number of rows (`ndim`).
    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of columns (state dimension).
    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Dimension of the randomization space this map lands in.
    pub fn range_dim(&self) -> usize {
        self.nrows()
    }

    /// Dimension of the state space this map acts on.
    pub fn domain_dim(&self) -> usize {
        self.ncols()
    }

    /// Column `j` as a contiguous view.
    pub fn column(&self, j: usize) -> DVectorView<'_, f64> {
        self.matrix.column(j)
    }

    /// Underlying matrix.
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}

impl From<DMatrix<f64>> for LinearMap {
    fn from(matrix: DMatrix<f64>) -> Self {
        Self::new(matrix)
    }
}

/// Per-sample state vectors, one column per sample point (`k x npt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateMatrix {
    matrix: DMatrix<f64>,
}

impl StateMatrix {
    /// Wrap an existing matrix.
    pub fn new(matrix: DMatrix<f64>) -> Self {
        Self { matrix }
    }

    /// Build from column-major data (`dim` values per sample point).
    pub fn from_column_slice(dim: usize, n_points: usize, data: &[f64]) -> Result<Self> {
        check_len("StateMatrix", dim, n_points, data.len())?;
        Ok(Self { matrix: DMatrix::from_column_slice(dim, n_points, data) })
    }

    /// Number of rows (state dimension).
    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of columns (sample points).
    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// State dimension `k`.
    pub fn dim(&self) -> usize {
        self.nrows()
    }

    /// Number of sample points `npt`.
    pub fn n_points(&self) -> usize {
        self.ncols()
    }

    /// State vector of sample point `j`.
    pub fn column(&self, j: usize) -> DVectorView<'_, f64> {
        self.matrix.column(j)
    }

    /// Underlying matrix.
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}

impl From<DMatrix<f64>> for StateMatrix {
    fn from(matrix: DMatrix<f64>) -> Self {
        Self::new(matrix)
    }
}

/// Fixed additive term `h` of the affine map, length `ndim`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    vector: DVector<f64>,
}

impl Offset {
    /// Wrap an existing vector.
    pub fn new(vector: DVector<f64>) -> Self {
        Self { vector }
    }

    /// Copy from a slice.
    pub fn from_slice(data: &[f64]) -> Self {
        Self { vector: DVector::from_column_slice(data) }
    }

    /// All-zero offset of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self { vector: DVector::zeros(n) }
    }

    /// Length (`ndim`).
    pub fn len(&self) -> usize {
        self.vector.len()
    }

    /// True for a zero-dimensional offset.
    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }

    /// Underlying vector.
    pub fn as_vector(&self) -> &DVector<f64> {
        &self.vector
    }
}

impl From<DVector<f64>> for Offset {
    fn from(vector: DVector<f64>) -> Self {
        Self::new(vector)
    }
}

/// Standard deviation of each coordinate of the isotropic randomization noise.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct NoiseScale(f64);

impl NoiseScale {
    /// Validate and wrap a scale.
    pub fn new(sigma: f64) -> Result<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "noise scale must be finite and > 0, got {sigma}"
            )));
        }
        Ok(Self(sigma))
    }

    /// Raw value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for NoiseScale {
    type Error = Error;

    fn try_from(sigma: f64) -> Result<Self> {
        Self::new(sigma)
    }
}

impl From<NoiseScale> for f64 {
    fn from(s: NoiseScale) -> f64 {
        s.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_state_matrix_column_major() {
        // Two points in 3 dimensions: columns are (1,2,3) and (4,5,6).
        let s = StateMatrix::from_column_slice(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(s.dim(), 3);
        assert_eq!(s.n_points(), 2);
        assert_eq!(s.column(1).as_slice(), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_linear_map_dims() {
        let a = LinearMap::from_column_slice(2, 3, &[0.0; 6]).unwrap();
        assert_eq!(a.range_dim(), 2);
        assert_eq!(a.domain_dim(), 3);
    }

    #[test]
    fn test_from_column_slice_length_mismatch() {
        let err = LinearMap::from_column_slice(2, 3, &[0.0; 5]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
        let err = StateMatrix::from_column_slice(2, 2, &[0.0; 5]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch(_)));
    }

    #[test]
    fn test_empty_state_matrix() {
        let s = StateMatrix::from_column_slice(4, 0, &[]).unwrap();
        assert_eq!(s.dim(), 4);
        assert_eq!(s.n_points(), 0);
    }

    #[test]
    fn test_offset() {
        let h = Offset::from_slice(&[1.5, -2.0]);
        assert_eq!(h.len(), 2);
        assert!(!h.is_empty());
        assert!(Offset::zeros(0).is_empty());
        assert_relative_eq!(h.as_vector()[1], -2.0);
    }

    #[test]
    fn test_noise_scale_validation() {
        assert_relative_eq!(NoiseScale::new(0.5).unwrap().get(), 0.5);
        assert!(matches!(NoiseScale::new(0.0), Err(Error::InvalidParameter(_))));
        assert!(NoiseScale::new(-1.0).is_err());
        assert!(NoiseScale::new(f64::NAN).is_err());
        assert!(NoiseScale::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_noise_scale_serde_validates() {
        let s: NoiseScale = serde_json::from_str("2.0").unwrap();
        assert_relative_eq!(s.get(), 2.0);
        assert!(serde_json::from_str::<NoiseScale>("-2.0").is_err());
        assert_eq!(serde_json::to_string(&s).unwrap(), "2.0");
    }

    #[test]
    fn test_linear_map_serde_roundtrip() {
        let a = LinearMap::from_column_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let json = serde_json::to_string(&a).unwrap();
        let back: LinearMap = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}

use nalgebra::{DVector, DVectorView};
use si_core::{Error, LinearMap, Offset, Result};

/// Reconstructs the randomization vector of one sample point.
///
/// Borrows the two linear maps and the offset, which are shared by every
/// sample point of a batch.
#[derive(Debug, Clone, Copy)]
pub struct AffineReconstructor<'a> {
    internal_linear: &'a LinearMap,
    optimization_linear: &'a LinearMap,
    offset: &'a Offset,
}

impl<'a> AffineReconstructor<'a> {
    /// Create a reconstructor; the maps must share a range of dimension `offset.len()`.
    pub fn new(
        internal_linear: &'a LinearMap,
        optimization_linear: &'a LinearMap,
        offset: &'a Offset,
    ) -> Result<Self> {
        let ndim = optimization_linear.range_dim();
        if internal_linear.range_dim() != ndim {
            return Err(Error::ShapeMismatch(format!(
                "randomization dimension mismatch: internal linear map has {} rows, optimization linear map has {ndim}",
                internal_linear.range_dim()
            )));
        }
        if offset.len() != ndim {
            return Err(Error::ShapeMismatch(format!(
                "offset length {} does not match randomization dimension {ndim}",
                offset.len()
            )));
        }
        Ok(Self { internal_linear, optimization_linear, offset })
    }

    /// Skips the checks of [`AffineReconstructor::new`]; callers have already
    /// run `validate_shapes` on the same maps and offset.
    pub(crate) fn from_validated(
        internal_linear: &'a LinearMap,
        optimization_linear: &'a LinearMap,
        offset: &'a Offset,
    ) -> Self {
        debug_assert_eq!(internal_linear.range_dim(), offset.len());
        debug_assert_eq!(optimization_linear.range_dim(), offset.len());
        Self { internal_linear, optimization_linear, offset }
    }

    /// Dimension of the randomization space.
    pub fn ndim(&self) -> usize {
        self.offset.len()
    }

    /// Write `A_D internal + A_O optimization + h` into `out`.
    ///
    /// `out` is overwritten, so one buffer can be reused across sample points.
    ///
    /// # Panics
    ///
    /// Panics if `internal`, `optimization` or `out` do not match the map
    /// dimensions. Use [`AffineReconstructor::reconstruct`] for a checked call.
    #[inline]
    pub fn reconstruct_into(
        &self,
        internal: &DVectorView<'_, f64>,
        optimization: &DVectorView<'_, f64>,
        out: &mut DVector<f64>,
    ) {
        out.copy_from(self.offset.as_vector());
        out.gemv(1.0, self.internal_linear.as_matrix(), internal, 1.0);
        out.gemv(1.0, self.optimization_linear.as_matrix(), optimization, 1.0);
    }

    /// Checked, allocating variant of [`AffineReconstructor::reconstruct_into`].
    pub fn reconstruct(
        &self,
        internal: DVectorView<'_, f64>,
        optimization: DVectorView<'_, f64>,
    ) -> Result<DVector<f64>> {
        if internal.len() != self.internal_linear.domain_dim() {
            return Err(Error::ShapeMismatch(format!(
                "internal state has length {}, internal linear map expects {}",
                internal.len(),
                self.internal_linear.domain_dim()
            )));
        }
        if optimization.len() != self.optimization_linear.domain_dim() {
            return Err(Error::ShapeMismatch(format!(
                "optimization state has length {}, optimization linear map expects {}",
                optimization.len(),
                self.optimization_linear.domain_dim()
            )));
        }
        let mut out = DVector::zeros(self.ndim());
        self.reconstruct_into(&internal, &optimization, &mut out);
        Ok(out)
    }
}

//! Small numeric helpers shared by the density kernels.

/// Natural log of `sqrt(2π)`.
///
/// `ln(sqrt(2π)) = 0.5*ln(2π)` (precomputed to keep this crate const-friendly).
pub const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_7;

/// Squared Euclidean norm of `xs / scale`, dividing each term before squaring.
#[inline]
pub fn sum_squares_scaled(xs: &[f64], scale: f64) -> f64 {
    xs.iter()
        .map(|x| {
            let z = x / scale;
            z * z
        })
        .sum()
}

/// L1 norm `Σ |x_i|`.
#[inline]
pub fn sum_abs(xs: &[f64]) -> f64 {
    xs.iter().map(|x| x.abs()).sum()
}

use ndarray::Array2;

use crate::consts::{Scalar, GAUSS_SIGMA_DIVISOR, MAX_GAUSS_MASK_SIZE, MIN_GAUSS_MASK_SIZE};
use crate::error::{Result, SpeckleError};

/// Square table of Gaussian smoothing weights.
///
/// Built as the outer product of a sampled 1D Gaussian with itself and
/// normalized so all weights sum to one. `size` is odd and bounded by
/// [`MAX_GAUSS_MASK_SIZE`].
#[derive(Clone, Debug, PartialEq)]
pub struct GaussMask {
    size: usize,
    /// Row-major `size * size` weights, indexed `[j * size + i]`.
    weights: Vec<Scalar>,
}

impl GaussMask {
    pub fn new(size: usize) -> Result<Self> {
        validate_mask_size(size)?;

        let coeffs = gaussian_coefficients(size);
        let mut weights = Vec::with_capacity(size * size);
        for cj in &coeffs {
            for ci in &coeffs {
                weights.push(ci * cj);
            }
        }

        let sum: Scalar = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Ok(Self { size, weights })
    }

    /// Edge length of the mask.
    pub fn size(&self) -> usize {
        self.size
    }

    /// `(size - 1) / 2`.
    pub fn half(&self) -> usize {
        (self.size - 1) / 2
    }

    /// Weight of tap `(i, j)`: column `i`, row `j`, both in `0..size`.
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> Scalar {
        self.weights[j * self.size + i]
    }

    pub fn sum(&self) -> Scalar {
        self.weights.iter().sum()
    }

    /// Copy of the weights as a `(size, size)` array.
    pub fn to_array(&self) -> Array2<Scalar> {
        Array2::from_shape_fn((self.size, self.size), |(j, i)| self.weight(i, j))
    }
}

/// Mask sizes must be odd and within `MIN_GAUSS_MASK_SIZE..=MAX_GAUSS_MASK_SIZE`.
pub fn validate_mask_size(size: usize) -> Result<()> {
    if size % 2 == 0 {
        return Err(SpeckleError::Config(format!(
            "Gauss mask size must be odd, got {size}"
        )));
    }
    if !(MIN_GAUSS_MASK_SIZE..=MAX_GAUSS_MASK_SIZE).contains(&size) {
        return Err(SpeckleError::Config(format!(
            "Gauss mask size {size} outside supported range \
             {MIN_GAUSS_MASK_SIZE}..={MAX_GAUSS_MASK_SIZE}"
        )));
    }
    Ok(())
}

/// Unnormalized 1D Gaussian samples at offsets `-half..=half`.
fn gaussian_coefficients(size: usize) -> Vec<Scalar> {
    let half = (size - 1) / 2;
    let sigma = size as f64 / GAUSS_SIGMA_DIVISOR;
    let s2 = 2.0 * sigma * sigma;

    (0..size)
        .map(|i| {
            let d = i as f64 - half as f64;
            (-d * d / s2).exp()
        })
        .collect()
}

//! Per-pixel arithmetic shared by every dispatch strategy.
//!
//! Gradient stencil, for a pixel at least [`GRAD_STENCIL_RADIUS`] pixels away
//! from every edge (4th-order central difference):
//!
//! ```text
//! dI/dx = C1 * (I(x-2, y) - I(x+2, y)) + C2 * (I(x+1, y) - I(x-1, y))
//! ```
//!
//! with `C1 = 1/12`, `C2 = 8/12`, and the same along y. Any other pixel uses a
//! 2-point stencil on each axis: forward difference on the first row/column,
//! backward difference on the last, central difference `(I(+1) - I(-1)) / 2`
//! elsewhere, and zero when the axis is a single pixel long. All of these are
//! exact for a linear ramp.

use ndarray::ArrayView2;

use crate::consts::{Intensity, Scalar, GRAD_C1, GRAD_C2, GRAD_STENCIL_RADIUS};
use crate::filters::gauss::GaussMask;

/// Read-only random access to the intensities of a full image.
///
/// Implementors may hold only part of the image in memory as long as every
/// coordinate the stencils touch is available.
pub trait PixelSource {
    /// `(width, height)` of the full image.
    fn extent(&self) -> (usize, usize);

    /// Intensity at column `x`, row `y`.
    fn intensity(&self, x: usize, y: usize) -> Intensity;
}

impl PixelSource for ArrayView2<'_, Intensity> {
    fn extent(&self) -> (usize, usize) {
        (self.ncols(), self.nrows())
    }

    #[inline]
    fn intensity(&self, x: usize, y: usize) -> Intensity {
        self[[y, x]]
    }
}

/// True when the 4th-order stencil fits around `(x, y)` on both axes.
#[inline]
pub fn is_interior(x: usize, y: usize, width: usize, height: usize) -> bool {
    x >= GRAD_STENCIL_RADIUS
        && x + GRAD_STENCIL_RADIUS < width
        && y >= GRAD_STENCIL_RADIUS
        && y + GRAD_STENCIL_RADIUS < height
}

/// `(dI/dx, dI/dy)` at `(x, y)`.
#[inline]
pub fn gradient_at<S: PixelSource>(src: &S, x: usize, y: usize) -> (Scalar, Scalar) {
    let (width, height) = src.extent();
    if is_interior(x, y, width, height) {
        let gx = GRAD_C1 * (src.intensity(x - 2, y) - src.intensity(x + 2, y))
            + GRAD_C2 * (src.intensity(x + 1, y) - src.intensity(x - 1, y));
        let gy = GRAD_C1 * (src.intensity(x, y - 2) - src.intensity(x, y + 2))
            + GRAD_C2 * (src.intensity(x, y + 1) - src.intensity(x, y - 1));
        (gx, gy)
    } else {
        let gx = two_point_derivative(|i| src.intensity(i, y), x, width);
        let gy = two_point_derivative(|j| src.intensity(x, j), y, height);
        (gx, gy)
    }
}

fn two_point_derivative(sample: impl Fn(usize) -> Intensity, i: usize, len: usize) -> Scalar {
    if len < 2 {
        0.0
    } else if i == 0 {
        sample(1) - sample(0)
    } else if i == len - 1 {
        sample(i) - sample(i - 1)
    } else {
        0.5 * (sample(i + 1) - sample(i - 1))
    }
}

/// Mask-weighted average of the neighbourhood of `(x, y)`.
///
/// Taps falling outside the image are dropped and the remaining weights are
/// renormalized, so edge pixels stay a proper weighted average.
#[inline]
pub fn gauss_at<S: PixelSource>(src: &S, mask: &GaussMask, x: usize, y: usize) -> Intensity {
    let (width, height) = src.extent();
    let half = mask.half();
    let mut sum = 0.0;
    let mut weight_sum = 0.0;

    for j in 0..mask.size() {
        let Some(sy) = (y + j).checked_sub(half).filter(|&sy| sy < height) else {
            continue;
        };
        for i in 0..mask.size() {
            let Some(sx) = (x + i).checked_sub(half).filter(|&sx| sx < width) else {
                continue;
            };
            let w = mask.weight(i, j);
            sum += w * src.intensity(sx, sy);
            weight_sum += w;
        }
    }

    sum / weight_sum
}

use ndarray::{ArrayView2, ArrayViewMut2, Zip};

use crate::consts::{Intensity, Scalar};
use crate::filters::gauss::GaussMask;

use super::stencil::{gauss_at, gradient_at};
use super::ComputeStrategy;

/// One independent unit of work per pixel, scheduled by Rayon.
pub struct FlatStrategy;

impl ComputeStrategy for FlatStrategy {
    fn name(&self) -> &str {
        "flat"
    }

    fn gradients(
        &self,
        src: ArrayView2<'_, Intensity>,
        grad_x: ArrayViewMut2<'_, Scalar>,
        grad_y: ArrayViewMut2<'_, Scalar>,
    ) {
        Zip::indexed(grad_x)
            .and(grad_y)
            .par_for_each(|(y, x), gx, gy| {
                let (dx, dy) = gradient_at(&src, x, y);
                *gx = dx;
                *gy = dy;
            });
    }

    fn gauss(
        &self,
        src: ArrayView2<'_, Intensity>,
        mask: &GaussMask,
        dst: ArrayViewMut2<'_, Intensity>,
    ) {
        Zip::indexed(dst).par_for_each(|(y, x), out| {
            *out = gauss_at(&src, mask, x, y);
        });
    }
}
